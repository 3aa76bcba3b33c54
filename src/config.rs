use serde::{Deserialize, Serialize};

use crate::plane::Plane;

/// Vendor identifier. Only consulted for icon selection by renderers.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Vendor {
    #[default]
    HuaweiCloud,
    Aws,
    Azure,
    Cisco,
    Custom,
}

/// Solution architecture
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopologyMode {
    /// Hyper-converged: compute nodes carry the storage plane
    #[default]
    #[serde(rename = "HCI")]
    Hci,
    /// Dedicated storage nodes
    Standard,
}

/// How the switching layer is deployed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentMode {
    /// One core switch fabric carries every data plane
    #[default]
    Converged,
    /// One dedicated switch fabric per enabled plane
    #[serde(rename = "Physically_Separated")]
    PhysicallySeparated,
}

/// Switch redundancy for a single fabric
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redundancy {
    #[default]
    Single,
    Redundant,
}

impl Redundancy {
    pub fn is_redundant(self) -> bool {
        matches!(self, Redundancy::Redundant)
    }
}

/// Project configuration, as produced by the configuration editor
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    pub project_id: String,
    pub project_name: String,
    pub vendor: Vendor,
    pub mode: TopologyMode,
    pub network: NetworkConfig,
    pub management_count: u32,
    /// Fold the management role onto the first compute nodes
    pub reuse_compute: bool,
    pub node_count: u32,
    pub storage_count: u32,
    pub show_watermark: bool,
    pub show_legend: bool,
    pub show_bom: bool,
    pub watermark_text: String,
}

/// Network plane toggles and redundancy
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub deployment_mode: DeploymentMode,
    /// Converged mode only
    pub core_redundancy: Redundancy,
    pub enable_management: bool,
    pub management_redundancy: Redundancy,
    pub enable_business: bool,
    pub business_redundancy: Redundancy,
    pub enable_storage: bool,
    pub storage_redundancy: Redundancy,
    pub enable_backup: bool,
    pub backup_redundancy: Redundancy,
    /// Out-of-band management (always a single switch)
    pub enable_ipmi: bool,
}

impl NetworkConfig {
    pub fn is_converged(&self) -> bool {
        self.deployment_mode == DeploymentMode::Converged
    }

    /// Whether any plane at all would be wired
    pub fn any_plane_enabled(&self) -> bool {
        self.enable_management
            || self.enable_business
            || self.enable_storage
            || self.enable_backup
            || self.enable_ipmi
    }

    /// Whether servers may be wired into `plane`. Peer-link planes are not
    /// toggled here; they exist only inside a redundant fabric.
    pub fn is_enabled(&self, plane: Plane) -> bool {
        match plane {
            Plane::Management => self.enable_management,
            Plane::Business => self.enable_business,
            Plane::Storage => self.enable_storage,
            Plane::Backup => self.enable_backup,
            Plane::Ipmi => self.enable_ipmi,
            Plane::Stack | Plane::Mlag => false,
        }
    }

    /// Whether the converged core fabric has anything to carry
    pub fn needs_core(&self) -> bool {
        self.enable_management || self.enable_business || self.enable_storage || self.enable_backup
    }
}

impl ProjectConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_name.trim().is_empty() {
            return Err(ValidationError::InvalidGeneral(
                "project_name cannot be empty".to_string(),
            ));
        }

        let total_devices = [self.management_count, self.node_count, self.storage_count]
            .iter()
            .map(|&count| u64::from(count))
            .sum::<u64>();
        if total_devices > 0 && !self.network.any_plane_enabled() {
            return Err(ValidationError::InvalidNetwork(format!(
                "{} devices requested but every network plane is disabled",
                total_devices
            )));
        }

        if self.mode == TopologyMode::Standard && self.storage_count > 0 && !self.network.enable_storage {
            return Err(ValidationError::InvalidNetwork(
                "storage nodes require the storage plane to be enabled".to_string(),
            ));
        }

        if self.reuse_compute && self.management_count > 0 && self.node_count == 0 {
            return Err(ValidationError::InvalidNodes(
                "management role reuse requires at least one compute node".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether a dedicated storage layer is built
    pub fn has_storage_layer(&self) -> bool {
        self.mode == TopologyMode::Standard && self.storage_count > 0
    }

    /// Whether a dedicated management layer is built
    pub fn has_management_layer(&self) -> bool {
        !self.reuse_compute && self.management_count > 0
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
    #[error("Invalid node configuration: {0}")]
    InvalidNodes(String),
}

/// Default implementations
impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_id: "PRJ-0001".to_string(),
            project_name: "Cloud Delivery Project".to_string(),
            vendor: Vendor::default(),
            mode: TopologyMode::Hci,
            network: NetworkConfig::default(),
            management_count: 2,
            reuse_compute: false,
            node_count: 6,
            storage_count: 3,
            show_watermark: true,
            show_legend: true,
            show_bom: false,
            watermark_text: "Internal - Do Not Distribute".to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            deployment_mode: DeploymentMode::Converged,
            core_redundancy: Redundancy::Redundant,
            enable_management: true,
            management_redundancy: Redundancy::Single,
            enable_business: true,
            business_redundancy: Redundancy::Redundant,
            enable_storage: true,
            storage_redundancy: Redundancy::Redundant,
            enable_backup: true,
            backup_redundancy: Redundancy::Single,
            enable_ipmi: true,
        }
    }
}
