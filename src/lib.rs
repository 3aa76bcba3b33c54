//! # Topogen - Reference network topology synthesis
//!
//! This library turns a compact infrastructure-delivery configuration into
//! a fully wired reference network design: positioned devices, cables
//! between specific physical ports, link-aggregation bonds, and the group
//! boxes a renderer needs to draw it.
//!
//! ## Overview
//!
//! A project configuration names the deployment mode, the device counts per
//! class, and which network planes are enabled and how redundant their
//! switches are. The synthesis engine expands it deterministically:
//!
//! - **Switch Fabrics**: one switch or a stacked / M-LAG pair per plane, or a
//!   single shared core in converged deployments
//! - **Node Layers**: management, compute and storage servers, each wired to
//!   every applicable plane, bonding business and storage uplinks
//! - **Layout**: grid placement and non-overlapping group boxes
//!
//! ## Architecture
//!
//! - `config`: Project configuration types and validation
//! - `config_loader`: Configuration file loading
//! - `plane`: Network plane table (color, speed, port names)
//! - `graph`: Output data model (devices, ports, bonds, links, groups)
//! - `topology`: The synthesis engine
//! - `ip`: Address plan for switches and servers
//! - `bom`: Bill-of-materials estimate over a generated graph
//! - `project`: Project file save/load
//! - `utils`: Topology consistency checks
//! - `orchestrator`: High-level generation flow
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use topogen::{config_loader, orchestrator};
//!
//! let config = config_loader::load_config("project.yaml".as_ref())?;
//! let report = orchestrator::generate_project_file(
//!     &config,
//!     "project_topology.json".as_ref(),
//!     &orchestrator::GenerateOptions::default(),
//! )?;
//! println!("{} devices", report.project.graph.devices.len());
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! project_name: "Cloud Delivery Project"
//! vendor: HUAWEI_CLOUD
//! mode: HCI                 # or Standard
//! management_count: 2
//! reuse_compute: false
//! node_count: 6
//! storage_count: 3
//! network:
//!   deployment_mode: Converged   # or Physically_Separated
//!   core_redundancy: Redundant
//!   enable_management: true
//!   management_redundancy: Single
//!   enable_business: true
//!   business_redundancy: Redundant
//!   enable_storage: true
//!   storage_redundancy: Redundant
//!   enable_backup: true
//!   backup_redundancy: Single
//!   enable_ipmi: true
//! ```
//!
//! ## Error Handling
//!
//! Library modules report typed errors (`ValidationError`, `TopologyError`,
//! `ProjectFileError`); file-facing entry points return
//! `color_eyre::Result` with context attached.

pub mod bom;
pub mod config;
pub mod config_loader;
pub mod graph;
pub mod ip;
pub mod orchestrator;
pub mod plane;
pub mod project;
pub mod topology;
pub mod utils;

pub use config::ProjectConfig;
pub use graph::TopologyGraph;
pub use topology::generate_topology;
