//! Graph accumulation for a single synthesis run.
//!
//! The builder owns every device, link and group while a topology is being
//! generated and hands out an immutable [`TopologyGraph`] when finished. It
//! also owns the per-switch downstream port counters, so two links landing
//! on the same switch can never share a port.

use std::collections::HashMap;

use log::debug;

use crate::graph::{Bond, Device, Group, Link, Port, PortSide, Rect, TopologyGraph};
use crate::plane::Plane;

/// Internal invariant violations raised while building a topology
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TopologyError {
    #[error("no switch fabric carries the {plane} plane required by device {device}")]
    UnresolvedFabric { plane: Plane, device: String },
    #[error("unknown device {0}")]
    UnknownDevice(String),
    #[error("duplicate device id {0}")]
    DuplicateDevice(String),
    #[error("port {port} already exists on device {device}")]
    DuplicatePort { device: String, port: String },
    #[error("port {port} does not exist on device {device}")]
    MissingPort { device: String, port: String },
    #[error("bond on device {device} references missing {plane} port {port}")]
    InvalidBond { device: String, plane: Plane, port: String },
}

#[derive(Debug, Default)]
pub struct TopologyBuilder {
    devices: Vec<Device>,
    links: Vec<Link>,
    groups: Vec<Group>,
    /// Device id -> position in `devices`
    index: HashMap<String, usize>,
    /// Switch id -> last allocated downstream interface number
    downstream: HashMap<String, u32>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_device(&mut self, device: Device) -> Result<String, TopologyError> {
        if self.index.contains_key(&device.id) {
            return Err(TopologyError::DuplicateDevice(device.id));
        }
        let id = device.id.clone();
        self.index.insert(id.clone(), self.devices.len());
        self.devices.push(device);
        Ok(id)
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.index.get(id).map(|&i| &self.devices[i])
    }

    fn device_mut(&mut self, id: &str) -> Result<&mut Device, TopologyError> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.devices[i]),
            None => Err(TopologyError::UnknownDevice(id.to_string())),
        }
    }

    /// Devices whose ids are listed, in the listed order
    pub fn devices_by_id<'a>(&'a self, ids: &'a [String]) -> impl Iterator<Item = &'a Device> {
        ids.iter().filter_map(move |id| self.device(id))
    }

    pub fn add_port(
        &mut self,
        device_id: &str,
        id: String,
        label: &str,
        side: PortSide,
        plane: Plane,
    ) -> Result<String, TopologyError> {
        let device = self.device_mut(device_id)?;
        if device.port(&id).is_some() {
            return Err(TopologyError::DuplicatePort { device: device_id.to_string(), port: id });
        }
        device.ports.push(Port {
            id: id.clone(),
            side,
            label: label.to_string(),
            color: plane.spec().color.to_string(),
            plane,
        });
        Ok(id)
    }

    /// Register a link aggregation group over existing ports of one plane
    pub fn add_bond(&mut self, device_id: &str, plane: Plane, ports: Vec<String>) -> Result<(), TopologyError> {
        let device = self.device_mut(device_id)?;
        for port_id in &ports {
            match device.port(port_id) {
                Some(port) if port.plane == plane => {}
                _ => {
                    return Err(TopologyError::InvalidBond {
                        device: device_id.to_string(),
                        plane,
                        port: port_id.clone(),
                    })
                }
            }
        }
        let name = format!("bond{}", device.bonds.len());
        device.bonds.push(Bond {
            name,
            plane,
            color: plane.spec().color.to_string(),
            ports,
        });
        Ok(())
    }

    /// Allocate the next free downstream port on a switch.
    ///
    /// Interface numbers start at 1 and are counted per switch; the label
    /// encodes the plane speed, slot 0 and the interface number.
    pub fn allocate_downstream_port(&mut self, switch_id: &str, plane: Plane) -> Result<String, TopologyError> {
        if !self.index.contains_key(switch_id) {
            return Err(TopologyError::UnknownDevice(switch_id.to_string()));
        }
        let counter = self.downstream.entry(switch_id.to_string()).or_insert(0);
        *counter += 1;
        let number = *counter;

        let label = format!("{}0/0/{}", plane.spec().speed, number);
        let port_id = self.add_port(switch_id, format!("down-{}", number), &label, PortSide::Bottom, plane)?;
        debug!("Allocated {} ({}) on {}", port_id, label, switch_id);
        Ok(port_id)
    }

    pub fn connect(&mut self, link: Link) -> Result<(), TopologyError> {
        for (device, port) in [(&link.source, &link.source_port), (&link.target, &link.target_port)] {
            let owner = self.device(device).ok_or_else(|| TopologyError::UnknownDevice(device.clone()))?;
            if owner.port(port).is_none() {
                return Err(TopologyError::MissingPort {
                    device: device.clone(),
                    port: port.clone(),
                });
            }
        }
        self.links.push(link);
        Ok(())
    }

    /// Add a group enclosing `bounds` and assign its members
    pub fn add_group(&mut self, id: &str, label: &str, bounds: Rect, members: &[String]) -> Result<(), TopologyError> {
        for member in members {
            self.device_mut(member)?.group_id = Some(id.to_string());
        }
        self.groups.push(Group {
            id: id.to_string(),
            label: label.to_string(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        });
        Ok(())
    }

    pub fn finish(self) -> TopologyGraph {
        TopologyGraph {
            devices: self.devices,
            links: self.links,
            groups: self.groups,
        }
    }
}
