//! Node layer generation.
//!
//! A layer is every server of one device class: management, compute or
//! storage. Each server is placed on the grid and wired into every plane
//! that is enabled and applies to its class. Large pools collapse into a
//! single stacked representative so the drawing stays bounded.

use log::{debug, info};

use super::builder::{TopologyBuilder, TopologyError};
use super::fabric::{Fabric, FabricRole, FabricSet};
use super::layout::{self, GROUP_HEADER};
use super::wiring::wire_uplinks;
use crate::config::{ProjectConfig, TopologyMode};
use crate::graph::{Device, DeviceClass};
use crate::ip;
use crate::plane::Plane;

/// Pools larger than this are drawn as one stacked representative
pub const STACK_THRESHOLD: u32 = 16;

/// Label suffix of devices that also carry the management role
pub const COMBINED_SUFFIX: &str = " (Mgmt)";

/// What to generate for one layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub class: DeviceClass,
    pub count: u32,
    /// Device id prefix, e.g. `comp` -> `comp-01`
    pub id_prefix: &'static str,
    /// Device label prefix, e.g. `CNA` -> `CNA-01`
    pub label_prefix: &'static str,
    pub group_label: String,
    /// Leading devices that also carry the management role
    pub combined: u32,
}

impl LayerSpec {
    pub fn management(config: &ProjectConfig) -> Self {
        Self {
            class: DeviceClass::Management,
            count: config.management_count,
            id_prefix: "mgmt",
            label_prefix: "MGT",
            group_label: "Management Pool".to_string(),
            combined: 0,
        }
    }

    pub fn compute(config: &ProjectConfig) -> Self {
        let group_label = match config.mode {
            TopologyMode::Hci => "Hyper-Converged Pool (HCI)",
            TopologyMode::Standard => "Compute Pool",
        };
        Self {
            class: DeviceClass::Compute,
            count: config.node_count,
            id_prefix: "comp",
            label_prefix: "CNA",
            group_label: group_label.to_string(),
            combined: if config.reuse_compute { config.management_count } else { 0 },
        }
    }

    pub fn storage(config: &ProjectConfig) -> Self {
        Self {
            class: DeviceClass::Storage,
            count: config.storage_count,
            id_prefix: "store",
            label_prefix: "SNA",
            group_label: "Storage Pool".to_string(),
            combined: 0,
        }
    }

    /// Whether the layer collapses into one stacked representative
    pub fn is_stacked(&self) -> bool {
        self.count > STACK_THRESHOLD
    }

    /// Number of devices actually emitted
    pub fn emitted(&self) -> usize {
        if self.is_stacked() {
            1
        } else {
            self.count as usize
        }
    }

    /// Number of emitted devices that carry the management role
    pub fn combined_emitted(&self) -> usize {
        (self.combined as usize).min(self.emitted())
    }
}

/// Whether a plane applies to a device class at all
pub fn plane_applies(plane: Plane, class: DeviceClass, mode: TopologyMode) -> bool {
    match (plane, class) {
        (Plane::Stack | Plane::Mlag, _) | (_, DeviceClass::Switch) => false,
        (Plane::Storage, DeviceClass::Management) => false,
        (Plane::Storage, DeviceClass::Compute) => mode == TopologyMode::Hci,
        (Plane::Business, DeviceClass::Storage) => false,
        _ => true,
    }
}

/// Whether a device of `class` bonds two uplinks on `plane`.
///
/// Management only dual-homes onto a dedicated redundant management fabric;
/// on a shared core it stays single-homed.
pub fn requires_lag(plane: Plane, class: DeviceClass, fabric: &Fabric) -> bool {
    match plane {
        Plane::Business | Plane::Storage => class.is_data_bearing(),
        Plane::Management => fabric.role == FabricRole::Management && fabric.is_redundant(),
        Plane::Backup | Plane::Ipmi | Plane::Stack | Plane::Mlag => false,
    }
}

fn device_for(spec: &LayerSpec, index: usize, x: f64, y: f64) -> Device {
    let (id, label, sub_label, ip, stack_count) = if spec.is_stacked() {
        (
            format!("{}-01", spec.id_prefix),
            format!("{}-01~{:02}", spec.label_prefix, spec.count),
            Some(format!("x{}", spec.count)),
            None,
            Some(spec.count),
        )
    } else {
        (
            format!("{}-{:02}", spec.id_prefix, index + 1),
            format!("{}-{:02}", spec.label_prefix, index + 1),
            None,
            ip::server_address(spec.class, index),
            None,
        )
    };

    let combined = index < spec.combined_emitted();
    Device {
        id,
        class: spec.class,
        label: if combined { format!("{}{}", label, COMBINED_SUFFIX) } else { label },
        sub_label,
        ip,
        x,
        y,
        group_id: None,
        stack_count,
        combined_role: if combined { Some(DeviceClass::Management) } else { None },
        ports: Vec::new(),
        bonds: Vec::new(),
    }
}

/// Generate one layer below `origin_y`.
///
/// Returns the first free vertical coordinate below the layer; an empty
/// layer emits nothing and returns `origin_y` unchanged.
pub fn build_layer(
    builder: &mut TopologyBuilder,
    spec: &LayerSpec,
    origin_y: f64,
    fabrics: &FabricSet,
    config: &ProjectConfig,
) -> Result<f64, TopologyError> {
    if spec.count == 0 {
        debug!("Skipping empty {:?} layer", spec.class);
        return Ok(origin_y);
    }

    let separated = !config.network.is_converged();
    let content_top = origin_y + GROUP_HEADER;
    let planes: Vec<Plane> = Plane::SERVER_PLANES
        .into_iter()
        .filter(|&p| config.network.is_enabled(p) && plane_applies(p, spec.class, config.mode))
        .collect();

    let mut ids = Vec::with_capacity(spec.emitted());
    for index in 0..spec.emitted() {
        let (x, y) = layout::grid_position(index, content_top, separated);
        let device_id = builder.add_device(device_for(spec, index, x, y))?;

        for &plane in &planes {
            let fabric = fabrics.for_plane(plane).ok_or_else(|| TopologyError::UnresolvedFabric {
                plane,
                device: device_id.clone(),
            })?;
            wire_uplinks(builder, &device_id, plane, fabric, requires_lag(plane, spec.class, fabric))?;
        }
        ids.push(device_id);
    }

    let group_id = format!("grp-{}", spec.id_prefix);
    let bounds = match layout::enclose(builder.devices_by_id(&ids)) {
        Some(bounds) => bounds,
        None => return Ok(origin_y),
    };
    builder.add_group(&group_id, &spec.group_label, bounds, &ids)?;

    if spec.is_stacked() {
        info!(
            "{:?} layer: {} units collapsed into stacked representative {}",
            spec.class, spec.count, ids[0]
        );
    } else {
        info!("{:?} layer: {} devices wired into {} plane(s)", spec.class, ids.len(), planes.len());
    }
    Ok(layout::next_origin(&bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeploymentMode, Redundancy};
    use crate::topology::fabric::build_fabric_row;

    fn build(config: &ProjectConfig, spec: &LayerSpec) -> (crate::graph::TopologyGraph, f64, f64) {
        let mut builder = TopologyBuilder::new();
        let (fabrics, origin) = build_fabric_row(&mut builder, &config.network).unwrap();
        let next = build_layer(&mut builder, spec, origin, &fabrics, config).unwrap();
        (builder.finish(), origin, next)
    }

    #[test]
    fn test_plane_applicability() {
        assert!(!plane_applies(Plane::Storage, DeviceClass::Management, TopologyMode::Hci));
        assert!(plane_applies(Plane::Storage, DeviceClass::Compute, TopologyMode::Hci));
        assert!(!plane_applies(Plane::Storage, DeviceClass::Compute, TopologyMode::Standard));
        assert!(!plane_applies(Plane::Business, DeviceClass::Storage, TopologyMode::Standard));
        assert!(plane_applies(Plane::Ipmi, DeviceClass::Storage, TopologyMode::Standard));
        assert!(!plane_applies(Plane::Stack, DeviceClass::Compute, TopologyMode::Hci));
    }

    #[test]
    fn test_grid_wraps_and_group_encloses() {
        let mut config = ProjectConfig::default();
        config.node_count = 10;
        let spec = LayerSpec::compute(&config);
        let (graph, origin, next) = build(&config, &spec);

        let computes: Vec<_> = graph.devices_of(DeviceClass::Compute).collect();
        assert_eq!(computes.len(), 10);
        assert_eq!(computes[0].y, computes[7].y);
        assert_eq!(computes[8].y, computes[0].y + layout::ROW_PITCH);
        assert_eq!(computes[8].x, computes[0].x);

        let group = graph.group("grp-comp").unwrap();
        assert_eq!(group.y, origin);
        for device in &computes {
            assert!(group.bounds().contains(&device.bounds()));
            assert_eq!(device.group_id.as_deref(), Some("grp-comp"));
        }
        assert!(next > group.bounds().bottom());
    }

    #[test]
    fn test_stacked_representative() {
        let mut config = ProjectConfig::default();
        config.node_count = 20;
        let spec = LayerSpec::compute(&config);
        assert!(spec.is_stacked());
        let (graph, _, _) = build(&config, &spec);

        let computes: Vec<_> = graph.devices_of(DeviceClass::Compute).collect();
        assert_eq!(computes.len(), 1);
        assert_eq!(computes[0].stack_count, Some(20));
        assert_eq!(computes[0].label, "CNA-01~20");
        assert_eq!(computes[0].sub_label.as_deref(), Some("x20"));
        assert!(graph.links_of("comp-01").count() > 0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut config = ProjectConfig::default();
        config.node_count = STACK_THRESHOLD;
        let spec = LayerSpec::compute(&config);
        assert!(!spec.is_stacked());
        assert_eq!(spec.emitted(), STACK_THRESHOLD as usize);
    }

    #[test]
    fn test_reuse_on_stacked_pool() {
        let mut config = ProjectConfig::default();
        config.reuse_compute = true;
        config.management_count = 2;
        config.node_count = 20;
        let spec = LayerSpec::compute(&config);
        assert_eq!(spec.combined_emitted(), 1);

        let (graph, _, _) = build(&config, &spec);
        let computes: Vec<_> = graph.devices_of(DeviceClass::Compute).collect();
        assert_eq!(computes.len(), 1);
        assert_eq!(computes[0].label, "CNA-01~20 (Mgmt)");
        assert_eq!(computes[0].combined_role, Some(DeviceClass::Management));
        assert_eq!(computes[0].stack_count, Some(20));
        assert!(graph.links_of("comp-01").any(|l| l.plane == Plane::Management));
    }

    #[test]
    fn test_empty_layer_emits_nothing() {
        let mut config = ProjectConfig::default();
        config.storage_count = 0;
        config.mode = TopologyMode::Standard;
        let spec = LayerSpec::storage(&config);
        let (graph, origin, next) = build(&config, &spec);

        assert_eq!(next, origin);
        assert!(graph.group("grp-store").is_none());
        assert_eq!(graph.devices_of(DeviceClass::Storage).count(), 0);
    }

    #[test]
    fn test_management_lag_only_on_dedicated_redundant_fabric() {
        let mut config = ProjectConfig::default();
        config.node_count = 1;
        let spec = LayerSpec::compute(&config);

        // Converged, redundant core: management stays single-homed
        let (graph, _, _) = build(&config, &spec);
        assert_eq!(graph.links_on(Plane::Management).count(), 1);
        assert!(graph.device("comp-01").unwrap().bond_for(Plane::Management).is_none());

        // Separated, redundant management fabric: bonded across both switches
        config.network.deployment_mode = DeploymentMode::PhysicallySeparated;
        config.network.management_redundancy = Redundancy::Redundant;
        let (graph, _, _) = build(&config, &spec);
        let targets: Vec<_> = graph.links_on(Plane::Management).map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["sw-mgmt-01", "sw-mgmt-02"]);
        assert!(graph.device("comp-01").unwrap().bond_for(Plane::Management).is_some());
    }

    #[test]
    fn test_storage_devices_skip_business() {
        let mut config = ProjectConfig::default();
        config.mode = TopologyMode::Standard;
        config.storage_count = 2;
        let spec = LayerSpec::storage(&config);
        let (graph, _, _) = build(&config, &spec);

        for device in graph.devices_of(DeviceClass::Storage) {
            let planes: Vec<_> = graph.links_of(&device.id).map(|l| l.plane).collect();
            assert!(!planes.contains(&Plane::Business));
            assert!(planes.contains(&Plane::Storage));
            assert!(device.bond_for(Plane::Storage).is_some());
        }
    }

    #[test]
    fn test_separated_layer_shifted_right() {
        let mut config = ProjectConfig::default();
        config.node_count = 1;
        config.network.deployment_mode = DeploymentMode::PhysicallySeparated;
        let spec = LayerSpec::compute(&config);
        let (graph, _, _) = build(&config, &spec);
        assert_eq!(
            graph.device("comp-01").unwrap().x,
            layout::ORIGIN_X + layout::SEPARATED_SHIFT_X
        );
    }
}
