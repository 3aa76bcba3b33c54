//! Topology consistency checks.
//!
//! These checks re-verify a finished graph from the outside, the same way a
//! downstream consumer would: they only look at the serialized data model
//! and never at builder state.

use std::collections::{HashMap, HashSet};

use crate::config::ProjectConfig;
use crate::graph::{DeviceClass, TopologyGraph};
use crate::topology::layer::plane_applies;

/// Validate a generated topology against its configuration
///
/// Checks for:
/// - Duplicate device ids and duplicate port ids within a device
/// - Links whose endpoint device or port does not exist
/// - Links on planes that are disabled or do not apply to the server class
/// - Switch downstream ports used by more than one link
/// - Bonds referencing missing ports or ports of another plane
/// - Devices outside their group box and overlapping group boxes
///
/// # Returns
/// * `Ok(())` if every check passes
/// * `Err(Vec<String>)` with one message per violation
///
/// # Examples
/// ```
/// use topogen::config::ProjectConfig;
/// use topogen::topology::generate_topology;
/// use topogen::utils::validation::check_topology;
///
/// let config = ProjectConfig::default();
/// let graph = generate_topology(&config).unwrap();
/// assert!(check_topology(&graph, &config).is_ok());
/// ```
pub fn check_topology(graph: &TopologyGraph, config: &ProjectConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut devices = HashMap::new();
    for device in &graph.devices {
        if devices.insert(device.id.as_str(), device).is_some() {
            errors.push(format!("Duplicate device id '{}'", device.id));
        }

        let mut port_ids = HashSet::new();
        for port in &device.ports {
            if !port_ids.insert(port.id.as_str()) {
                errors.push(format!("Duplicate port '{}' on device '{}'", port.id, device.id));
            }
        }

        for bond in &device.bonds {
            if bond.ports.len() < 2 {
                errors.push(format!("Bond '{}' on '{}' has fewer than two ports", bond.name, device.id));
            }
            for port_id in &bond.ports {
                match device.port(port_id) {
                    Some(port) if port.plane == bond.plane => {}
                    Some(port) => errors.push(format!(
                        "Bond '{}' on '{}' mixes {} port '{}' into a {} bond",
                        bond.name, device.id, port.plane, port_id, bond.plane
                    )),
                    None => errors.push(format!(
                        "Bond '{}' on '{}' references missing port '{}'",
                        bond.name, device.id, port_id
                    )),
                }
            }
        }
    }

    let mut used_ports: HashSet<(&str, &str)> = HashSet::new();
    for link in &graph.links {
        for (device_id, port_id) in [(&link.source, &link.source_port), (&link.target, &link.target_port)] {
            match devices.get(device_id.as_str()) {
                None => errors.push(format!("Link endpoint '{}' does not exist", device_id)),
                Some(device) => {
                    if device.port(port_id).is_none() {
                        errors.push(format!("Port '{}' missing on device '{}'", port_id, device_id));
                    }
                    if device.class == DeviceClass::Switch
                        && !used_ports.insert((device_id.as_str(), port_id.as_str()))
                    {
                        errors.push(format!("Switch port '{}' on '{}' used by more than one link", port_id, device_id));
                    }
                }
            }
        }

        if link.plane.is_peer_link() {
            continue;
        }
        if !config.network.is_enabled(link.plane) {
            errors.push(format!("Link {} -> {} is on disabled plane {}", link.source, link.target, link.plane));
        }
        if let Some(server) = devices.get(link.source.as_str()) {
            if !plane_applies(link.plane, server.class, config.mode) {
                errors.push(format!(
                    "Link from {:?} device '{}' on plane {} which does not apply to it",
                    server.class, server.id, link.plane
                ));
            }
        }
    }

    for device in &graph.devices {
        if let Some(group_id) = &device.group_id {
            match graph.group(group_id) {
                Some(group) if group.bounds().contains(&device.bounds()) => {}
                Some(_) => errors.push(format!("Device '{}' lies outside group '{}'", device.id, group_id)),
                None => errors.push(format!("Device '{}' references missing group '{}'", device.id, group_id)),
            }
        }
    }

    for (i, a) in graph.groups.iter().enumerate() {
        for b in graph.groups.iter().skip(i + 1) {
            if a.bounds().overlaps(&b.bounds()) {
                errors.push(format!("Group '{}' overlaps group '{}'", a.id, b.id));
            }
        }
    }

    if errors.is_empty() {
        log::debug!("Topology passed consistency checks");
        Ok(())
    } else {
        log::warn!("Topology failed {} consistency check(s)", errors.len());
        Err(errors)
    }
}
