//! Topology synthesis engine.
//!
//! Expands a [`ProjectConfig`] into a [`TopologyGraph`] in three stages:
//!
//! 1. **Fabrics** ([`fabric`]): one switch or a redundant pair per plane
//!    (or a shared core), each with its peer link and group box
//! 2. **Layers** ([`layer`]): management, compute and storage servers,
//!    each wired into every enabled plane that applies to it
//! 3. **Layout** ([`layout`]): grid coordinates and group boxes, threaded
//!    top to bottom so groups never overlap
//!
//! The whole run is a pure function of the configuration: the same input
//! always produces the same graph.

pub mod builder;
pub mod fabric;
pub mod layer;
pub mod layout;
pub mod wiring;

use log::{info, warn};

use crate::config::ProjectConfig;
use crate::graph::TopologyGraph;

pub use builder::{TopologyBuilder, TopologyError};
pub use fabric::{build_fabric, Fabric, FabricRole, FabricSet};
pub use layer::{build_layer, LayerSpec, STACK_THRESHOLD};

/// Generate the complete topology graph for a configuration
pub fn generate_topology(config: &ProjectConfig) -> Result<TopologyGraph, TopologyError> {
    info!(
        "Generating topology for '{}' ({:?}, {:?})",
        config.project_name, config.mode, config.network.deployment_mode
    );

    let mut builder = TopologyBuilder::new();
    let (fabrics, mut next_y) = fabric::build_fabric_row(&mut builder, &config.network)?;

    if config.has_management_layer() {
        next_y = build_layer(&mut builder, &LayerSpec::management(config), next_y, &fabrics, config)?;
    }

    let compute = LayerSpec::compute(config);
    if compute.combined as usize > compute.combined_emitted() {
        warn!(
            "Management role requested on {} nodes but only {} compute device(s) are emitted; capping",
            compute.combined,
            compute.combined_emitted()
        );
    }
    next_y = build_layer(&mut builder, &compute, next_y, &fabrics, config)?;

    if config.has_storage_layer() {
        next_y = build_layer(&mut builder, &LayerSpec::storage(config), next_y, &fabrics, config)?;
    }

    let graph = builder.finish();
    info!(
        "Generated {} devices, {} links, {} groups (canvas height {})",
        graph.devices.len(),
        graph.links.len(),
        graph.groups.len(),
        next_y
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopologyMode;
    use crate::graph::DeviceClass;

    #[test]
    fn test_layers_stack_without_overlap() {
        let mut config = ProjectConfig::default();
        config.mode = TopologyMode::Standard;
        config.management_count = 3;
        config.node_count = 12;
        config.storage_count = 5;

        let graph = generate_topology(&config).unwrap();
        let mgmt = graph.group("grp-mgmt").unwrap().bounds();
        let comp = graph.group("grp-comp").unwrap().bounds();
        let store = graph.group("grp-store").unwrap().bounds();

        assert!(mgmt.bottom() < comp.y);
        assert!(comp.bottom() < store.y);
        for (i, a) in graph.groups.iter().enumerate() {
            for b in graph.groups.iter().skip(i + 1) {
                assert!(!a.bounds().overlaps(&b.bounds()), "{} overlaps {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_reuse_capped_at_emitted_devices() {
        let mut config = ProjectConfig::default();
        config.reuse_compute = true;
        config.management_count = 5;
        config.node_count = 3;

        let graph = generate_topology(&config).unwrap();
        assert_eq!(graph.devices_of(DeviceClass::Management).count(), 0);
        assert!(graph
            .devices_of(DeviceClass::Compute)
            .all(|d| d.combined_role == Some(DeviceClass::Management)));
    }

    #[test]
    fn test_reuse_capped_on_stacked_pool() {
        let mut config = ProjectConfig::default();
        config.reuse_compute = true;
        config.management_count = 2;
        config.node_count = 20;

        let compute = LayerSpec::compute(&config);
        assert_eq!(compute.combined_emitted(), 1);

        let graph = generate_topology(&config).unwrap();
        let combined: Vec<_> = graph
            .devices_of(DeviceClass::Compute)
            .filter(|d| d.combined_role == Some(DeviceClass::Management))
            .collect();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].label, "CNA-01~20 (Mgmt)");
        assert!(graph.group("grp-mgmt").is_none());
    }

    #[test]
    fn test_hci_builds_no_storage_layer() {
        let config = ProjectConfig::default();
        let graph = generate_topology(&config).unwrap();
        assert_eq!(graph.devices_of(DeviceClass::Storage).count(), 0);
        assert!(graph.group("grp-store").is_none());
    }
}
