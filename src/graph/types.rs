//! Topology graph type definitions.
//!
//! This module contains the value types returned by the synthesis engine:
//! devices with their ports and bonds, links between ports, and the group
//! boxes used for visual clustering. All of them serialize with serde so
//! the graph can be handed to renderers and project files unchanged.

use serde::{Deserialize, Serialize};

use crate::plane::Plane;

// ============================================================================
// Devices
// ============================================================================

/// Kind of device in the topology
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Switch,
    Management,
    Compute,
    Storage,
}

impl DeviceClass {
    /// Servers are every class except switches
    pub fn is_server(self) -> bool {
        !matches!(self, DeviceClass::Switch)
    }

    /// Classes that carry tenant or storage data and therefore bond their
    /// business and storage uplinks
    pub fn is_data_bearing(self) -> bool {
        matches!(self, DeviceClass::Compute | DeviceClass::Storage)
    }

    /// Drawing footprint as (width, height)
    pub fn footprint(self) -> (f64, f64) {
        match self {
            DeviceClass::Switch => (60.0, 40.0),
            _ => (60.0, 60.0),
        }
    }
}

/// Edge of a device glyph where a port is drawn
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PortSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// A physical port on a device
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Port {
    /// Unique within the owning device
    pub id: String,
    pub side: PortSide,
    pub label: String,
    /// Mirrors the plane color
    pub color: String,
    pub plane: Plane,
}

/// Link aggregation group formed by ports of one device on one plane
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Bond {
    pub name: String,
    pub plane: Plane,
    pub color: String,
    /// Port ids on the owning device
    pub ports: Vec<String>,
}

/// A positioned device
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Device {
    pub id: String,
    pub class: DeviceClass,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sub_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ip: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group_id: Option<String>,
    /// Set when this device stands in for a pool of identical units
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stack_count: Option<u32>,
    /// Additional role folded onto this device
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combined_role: Option<DeviceClass>,
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub bonds: Vec<Bond>,
}

impl Device {
    pub fn port(&self, port_id: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.id == port_id)
    }

    pub fn bond_for(&self, plane: Plane) -> Option<&Bond> {
        self.bonds.iter().find(|b| b.plane == plane)
    }

    /// Number of physical units this device represents
    pub fn unit_count(&self) -> u32 {
        self.stack_count.unwrap_or(1)
    }

    pub fn is_stacked(&self) -> bool {
        self.stack_count.is_some()
    }

    /// Bounding box of the device glyph
    pub fn bounds(&self) -> Rect {
        let (width, height) = self.class.footprint();
        Rect { x: self.x, y: self.y, width, height }
    }
}

// ============================================================================
// Links and groups
// ============================================================================

/// A cable between two device ports
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Link {
    pub source: String,
    pub source_port: String,
    pub target: String,
    pub target_port: String,
    pub plane: Plane,
    pub speed: String,
    /// Member of a link aggregation group
    #[serde(default)]
    pub lag: bool,
}

/// Visual grouping box
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Group {
    pub fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rectangle containing every input rectangle
    pub fn union<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Rect> {
        rects.into_iter().fold(None, |acc, r| match acc {
            None => Some(r),
            Some(a) => {
                let x = a.x.min(r.x);
                let y = a.y.min(r.y);
                Some(Rect {
                    x,
                    y,
                    width: a.right().max(r.right()) - x,
                    height: a.bottom().max(r.bottom()) - y,
                })
            }
        })
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Touching edges do not count as overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ============================================================================
// Topology graph
// ============================================================================

/// Generated topology: the immutable result of one synthesis run
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TopologyGraph {
    pub devices: Vec<Device>,
    pub links: Vec<Link>,
    pub groups: Vec<Group>,
}

impl TopologyGraph {
    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn devices_of(&self, class: DeviceClass) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(move |d| d.class == class)
    }

    pub fn links_on(&self, plane: Plane) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.plane == plane)
    }

    /// Links touching the given device on either end
    pub fn links_of<'a>(&'a self, device_id: &'a str) -> impl Iterator<Item = &'a Link> {
        self.links
            .iter()
            .filter(move |l| l.source == device_id || l.target == device_id)
    }

    /// Planes present in at least one link, in canonical order (legend entries)
    pub fn planes_in_use(&self) -> Vec<Plane> {
        Plane::ALL
            .into_iter()
            .filter(|p| self.links.iter().any(|l| l.plane == *p))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.links.is_empty() && self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect { x, y, width, height }
    }

    #[test]
    fn test_rect_union() {
        let union = Rect::union(vec![rect(10.0, 10.0, 60.0, 40.0), rect(190.0, 10.0, 60.0, 40.0)]).unwrap();
        assert_eq!(union, rect(10.0, 10.0, 240.0, 40.0));
        assert_eq!(Rect::union(Vec::new()), None);
    }

    #[test]
    fn test_rect_overlap_and_containment() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(100.0, 0.0, 50.0, 50.0);
        let c = rect(50.0, 50.0, 100.0, 100.0);

        assert!(!a.overlaps(&b), "touching edges are not an overlap");
        assert!(a.overlaps(&c));
        assert!(a.contains(&rect(10.0, 10.0, 60.0, 60.0)));
        assert!(!a.contains(&c));
    }

    #[test]
    fn test_device_serialization_skips_empty_markers() {
        let device = Device {
            id: "comp-01".to_string(),
            class: DeviceClass::Compute,
            label: "CNA-01".to_string(),
            sub_label: None,
            ip: None,
            x: 100.0,
            y: 260.0,
            group_id: None,
            stack_count: None,
            combined_role: None,
            ports: Vec::new(),
            bonds: Vec::new(),
        };

        let json = serde_json::to_string(&device).unwrap();
        assert!(!json.contains("stack_count"));
        assert!(!json.contains("combined_role"));
        assert!(json.contains("\"class\":\"compute\""));

        let decoded: Device = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, device);
        assert_eq!(decoded.unit_count(), 1);
    }
}
