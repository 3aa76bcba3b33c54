//! # Topology Graph Module
//!
//! Output data model of the synthesis engine. A [`TopologyGraph`] holds
//! three ordered collections:
//!
//! - **Devices**: switches and servers with coordinates, ports and bonds
//! - **Links**: cables between one device port and another, tagged with a
//!   plane and a nominal speed
//! - **Groups**: rectangular boxes that visually cluster a switch fabric or
//!   a layer of servers
//!
//! ## Example Serialized Structure
//!
//! ```json
//! {
//!   "devices": [
//!     {
//!       "id": "sw-core-01",
//!       "class": "switch",
//!       "label": "Core-SW-A",
//!       "ip": "192.168.1.1",
//!       "x": 490.0,
//!       "y": 60.0,
//!       "group_id": "grp-sw-core",
//!       "ports": [{ "id": "down-1", "side": "bottom", "label": "1GE0/0/1",
//!                   "color": "#22c55e", "plane": "management" }],
//!       "bonds": []
//!     }
//!   ],
//!   "links": [
//!     { "source": "comp-01", "source_port": "management-0",
//!       "target": "sw-core-01", "target_port": "down-1",
//!       "plane": "management", "speed": "1GE", "lag": false }
//!   ],
//!   "groups": [
//!     { "id": "grp-sw-core", "label": "Core Switch Zone",
//!       "x": 450.0, "y": 0.0, "width": 320.0, "height": 140.0 }
//!   ]
//! }
//! ```
//!
//! Consumers treat the graph as read-only; the engine never mutates a graph
//! once it has been returned.

pub mod types;

pub use types::{Bond, Device, DeviceClass, Group, Link, Port, PortSide, Rect, TopologyGraph};
