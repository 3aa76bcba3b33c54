//! Network plane definitions.
//!
//! Every link in a generated topology belongs to exactly one plane. The
//! plane decides the link color and line style, the nominal speed, and the
//! names of the device-side ports that carry it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical traffic category of a link
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    Management,
    Business,
    Storage,
    Backup,
    Ipmi,
    /// Hardware stack between two switches of one fabric
    Stack,
    /// M-LAG peer link between two independent switches
    Mlag,
}

/// Line style used by renderers
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Fixed attributes of a plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub style: LineStyle,
    pub width: u8,
    pub speed: &'static str,
    /// Device-side port names for the first and second leg
    pub port_names: [&'static str; 2],
}

impl Plane {
    /// Canonical ordering, used for legends and per-plane summaries
    pub const ALL: [Plane; 7] = [
        Plane::Management,
        Plane::Business,
        Plane::Storage,
        Plane::Backup,
        Plane::Ipmi,
        Plane::Stack,
        Plane::Mlag,
    ];

    /// Planes that servers are wired into, in wiring order
    pub const SERVER_PLANES: [Plane; 5] = [
        Plane::Management,
        Plane::Business,
        Plane::Storage,
        Plane::Backup,
        Plane::Ipmi,
    ];

    pub fn spec(self) -> PlaneSpec {
        match self {
            Plane::Management => PlaneSpec {
                key: "management",
                label: "Management Plane (Mgmt)",
                color: "#22c55e",
                style: LineStyle::Solid,
                width: 1,
                speed: "1GE",
                port_names: ["Mgmt0", "Mgmt1"],
            },
            Plane::Business => PlaneSpec {
                key: "business",
                label: "Business Plane",
                color: "#3b82f6",
                style: LineStyle::Solid,
                width: 2,
                speed: "10GE",
                port_names: ["Eth0", "Eth1"],
            },
            Plane::Storage => PlaneSpec {
                key: "storage",
                label: "Storage Plane",
                color: "#f97316",
                style: LineStyle::Solid,
                width: 2,
                speed: "25GE",
                port_names: ["Stor0", "Stor1"],
            },
            Plane::Backup => PlaneSpec {
                key: "backup",
                label: "Backup Plane",
                color: "#06b6d4",
                style: LineStyle::Solid,
                width: 2,
                speed: "10GE",
                port_names: ["Bk0", "Bk1"],
            },
            Plane::Ipmi => PlaneSpec {
                key: "ipmi",
                label: "Out-of-Band Management (IPMI)",
                color: "#64748b",
                style: LineStyle::Dashed,
                width: 1,
                speed: "100M",
                port_names: ["BMC0", "BMC1"],
            },
            Plane::Stack => PlaneSpec {
                key: "stack",
                label: "Stack Link",
                color: "#8b5cf6",
                style: LineStyle::Solid,
                width: 3,
                speed: "100GE",
                port_names: ["Stack-L", "Stack-R"],
            },
            Plane::Mlag => PlaneSpec {
                key: "mlag",
                label: "M-LAG Peer Link",
                color: "#a855f7",
                style: LineStyle::Solid,
                width: 3,
                speed: "100GE",
                port_names: ["Peer-L", "Peer-R"],
            },
        }
    }

    /// Whether this plane joins two switches of one fabric
    pub fn is_peer_link(self) -> bool {
        matches!(self, Plane::Stack | Plane::Mlag)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().key)
    }
}
