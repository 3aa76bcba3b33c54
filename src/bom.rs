//! Bill-of-materials estimate.
//!
//! Reads a generated graph and tallies the hardware it implies. The counts
//! are a delivery estimate only: every link is one cable, optical links
//! need a module at each end, and stacked representatives count as the
//! number of units they stand for.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ProjectConfig;
use crate::graph::{DeviceClass, TopologyGraph};
use crate::plane::Plane;

/// One line of the estimate
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BomItem {
    pub category: &'static str,
    pub name: &'static str,
    pub count: u64,
    pub unit: &'static str,
}

/// Material estimate for one topology
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct BillOfMaterials {
    pub items: Vec<BomItem>,
    pub links_by_plane: BTreeMap<Plane, u64>,
    pub devices_by_class: BTreeMap<DeviceClass, u64>,
}

impl BillOfMaterials {
    pub fn count_of(&self, name: &str) -> Option<u64> {
        self.items.iter().find(|i| i.name == name).map(|i| i.count)
    }
}

pub const SWITCHES: &str = "Ethernet switch";
pub const SERVERS: &str = "x86 server";
pub const OPTICAL_MODULES: &str = "Optical module (SFP+/25G/QSFP)";
pub const FIBER_CABLES: &str = "Fiber patch cord (LC-LC)";
pub const COPPER_CABLES: &str = "CAT6 cable";
pub const DAC_CABLES: &str = "DAC cable";

/// Cable medium a link is counted as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Medium {
    Copper,
    Dac,
    Fiber,
}

fn medium_for(plane: Plane, config: &ProjectConfig) -> Medium {
    match plane {
        Plane::Ipmi => Medium::Copper,
        Plane::Management if !config.network.is_converged() => Medium::Copper,
        Plane::Stack | Plane::Mlag => Medium::Dac,
        _ => Medium::Fiber,
    }
}

/// Estimate materials for a generated topology
pub fn estimate(graph: &TopologyGraph, config: &ProjectConfig) -> BillOfMaterials {
    let mut bom = BillOfMaterials::default();

    // Stacked pools may stand for up to u32::MAX units each
    let mut switches: u64 = 0;
    let mut servers: u64 = 0;
    for device in &graph.devices {
        let units = u64::from(device.unit_count());
        let entry = bom.devices_by_class.entry(device.class).or_insert(0);
        *entry = entry.saturating_add(units);
        if device.class.is_server() {
            servers = servers.saturating_add(units);
        } else {
            switches += 1;
        }
    }

    let (mut modules, mut copper, mut dac, mut fiber): (u64, u64, u64, u64) = (0, 0, 0, 0);
    for link in &graph.links {
        *bom.links_by_plane.entry(link.plane).or_insert(0) += 1;
        match medium_for(link.plane, config) {
            Medium::Copper => copper += 1,
            Medium::Dac => {
                dac += 1;
                modules += 2;
            }
            Medium::Fiber => {
                fiber += 1;
                modules += 2;
            }
        }
    }

    bom.items.push(BomItem { category: "Network equipment", name: SWITCHES, count: switches, unit: "pcs" });
    bom.items.push(BomItem { category: "IT infrastructure", name: SERVERS, count: servers, unit: "pcs" });

    let optional = [
        ("Accessories", OPTICAL_MODULES, modules),
        ("Cabling", FIBER_CABLES, fiber),
        ("Cabling", COPPER_CABLES, copper),
        ("Cabling", DAC_CABLES, dac),
    ];
    for (category, name, count) in optional {
        if count > 0 {
            bom.items.push(BomItem { category, name, count, unit: "pcs" });
        }
    }

    log::debug!("Estimated {} BOM line(s) from {} links", bom.items.len(), graph.links.len());
    bom
}

/// Human-readable table
pub fn render_text(bom: &BillOfMaterials) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(60));
    lines.push("                   BILL OF MATERIALS".to_string());
    lines.push("=".repeat(60));

    for item in &bom.items {
        lines.push(format!("{:<40} {:>8} {}", item.name, item.count, item.unit));
        lines.push(format!("  {}", item.category));
    }
    lines.push(String::new());

    if !bom.links_by_plane.is_empty() {
        lines.push("Links by plane:".to_string());
        for (plane, count) in &bom.links_by_plane {
            lines.push(format!("  {:<12} {:>6}", plane.to_string(), count));
        }
        lines.push(String::new());
    }

    lines.push("* Estimate only, for reference".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentMode;
    use crate::topology::generate_topology;

    #[test]
    fn test_converged_estimate() {
        let mut config = ProjectConfig::default();
        config.node_count = 2;
        config.management_count = 0;
        config.network.enable_backup = false;
        config.network.enable_storage = false;
        let graph = generate_topology(&config).unwrap();
        let bom = estimate(&graph, &config);

        // 2 core + 1 IPMI switch
        assert_eq!(bom.count_of(SWITCHES), Some(3));
        assert_eq!(bom.count_of(SERVERS), Some(2));
        // per node: 1 mgmt + 2 business fiber, 1 IPMI copper; plus one stack DAC
        assert_eq!(bom.count_of(FIBER_CABLES), Some(6));
        assert_eq!(bom.count_of(COPPER_CABLES), Some(2));
        assert_eq!(bom.count_of(DAC_CABLES), Some(1));
        assert_eq!(bom.count_of(OPTICAL_MODULES), Some(14));
        assert_eq!(bom.links_by_plane.get(&Plane::Business), Some(&4));
    }

    #[test]
    fn test_stacked_nodes_count_as_units() {
        let mut config = ProjectConfig::default();
        config.node_count = 40;
        config.management_count = 0;
        let graph = generate_topology(&config).unwrap();
        let bom = estimate(&graph, &config);

        assert_eq!(bom.count_of(SERVERS), Some(40));
        assert_eq!(bom.devices_by_class.get(&DeviceClass::Compute), Some(&40));
    }

    #[test]
    fn test_server_total_beyond_u32() {
        let mut config = ProjectConfig::default();
        config.mode = crate::config::TopologyMode::Standard;
        config.management_count = 20;
        config.node_count = u32::MAX;
        config.storage_count = u32::MAX;
        let graph = generate_topology(&config).unwrap();
        let bom = estimate(&graph, &config);

        let expected = 20 + 2 * u64::from(u32::MAX);
        assert_eq!(bom.count_of(SERVERS), Some(expected));
        assert_eq!(bom.devices_by_class.get(&DeviceClass::Compute), Some(&u64::from(u32::MAX)));
        assert_eq!(bom.devices_by_class.get(&DeviceClass::Management), Some(&20));
    }

    #[test]
    fn test_separated_management_is_copper() {
        let mut config = ProjectConfig::default();
        config.network.deployment_mode = DeploymentMode::PhysicallySeparated;
        config.network.enable_ipmi = false;
        let graph = generate_topology(&config).unwrap();
        let bom = estimate(&graph, &config);

        let mgmt_links = graph.links_on(Plane::Management).count() as u64;
        assert_eq!(bom.count_of(COPPER_CABLES), Some(mgmt_links));
    }

    #[test]
    fn test_empty_graph_lists_only_fixed_items() {
        let config = ProjectConfig::default();
        let bom = estimate(&TopologyGraph::default(), &config);
        assert_eq!(bom.items.len(), 2);
        assert_eq!(bom.count_of(SWITCHES), Some(0));
        assert!(render_text(&bom).contains("BILL OF MATERIALS"));
    }
}
