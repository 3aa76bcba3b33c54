//! Switch fabric construction.
//!
//! A fabric is one switch, or a redundant pair joined by a peer link, plus
//! the group box around it. Every network plane that servers are wired into
//! resolves to exactly one fabric; in converged deployments the management,
//! business, storage and backup planes all share the core fabric.

use log::{debug, info};

use super::builder::{TopologyBuilder, TopologyError};
use super::layout::{self, CORE_OFFSET_X, FABRIC_GAP, GROUP_HEADER, GROUP_PADDING, IPMI_OFFSET_X, ORIGIN_X, ORIGIN_Y, SWITCH_GAP};
use crate::config::{NetworkConfig, Redundancy};
use crate::graph::{Device, DeviceClass, Link, PortSide, Rect};
use crate::ip;
use crate::plane::Plane;

/// Role a switch fabric plays in the design
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FabricRole {
    Core,
    Management,
    Business,
    Storage,
    Backup,
    Ipmi,
}

impl FabricRole {
    /// Short key used in device and group ids
    pub fn key(self) -> &'static str {
        match self {
            FabricRole::Core => "core",
            FabricRole::Management => "mgmt",
            FabricRole::Business => "bus",
            FabricRole::Storage => "stor",
            FabricRole::Backup => "backup",
            FabricRole::Ipmi => "ipmi",
        }
    }

    pub fn label_prefix(self) -> &'static str {
        match self {
            FabricRole::Core => "Core",
            FabricRole::Management => "Mgmt",
            FabricRole::Business => "Business",
            FabricRole::Storage => "Storage",
            FabricRole::Backup => "Backup",
            FabricRole::Ipmi => "IPMI",
        }
    }

    pub fn group_title(self) -> &'static str {
        match self {
            FabricRole::Core => "Core Switch Zone",
            FabricRole::Management => "Management Switch Zone",
            FabricRole::Business => "Business Switch Zone",
            FabricRole::Storage => "Storage Switch Zone",
            FabricRole::Backup => "Backup Switch Zone",
            FabricRole::Ipmi => "Out-of-Band Zone",
        }
    }

    /// Business and storage pairs run M-LAG with independent control
    /// planes; every other pair is a hardware stack.
    pub fn peer_plane(self) -> Plane {
        match self {
            FabricRole::Business | FabricRole::Storage => Plane::Mlag,
            FabricRole::Core | FabricRole::Management | FabricRole::Backup | FabricRole::Ipmi => Plane::Stack,
        }
    }
}

/// Handle to a built fabric
#[derive(Debug, Clone, PartialEq)]
pub struct Fabric {
    pub role: FabricRole,
    pub redundancy: Redundancy,
    /// One id for `Single`, two for `Redundant`
    pub switch_ids: Vec<String>,
    pub bounds: Rect,
}

impl Fabric {
    pub fn is_redundant(&self) -> bool {
        self.switch_ids.len() > 1
    }

    pub fn primary(&self) -> &str {
        &self.switch_ids[0]
    }

    /// Switch receiving the second leg of a dual-homed device. Falls back
    /// to the primary switch when the fabric is not redundant.
    pub fn secondary(&self) -> &str {
        self.switch_ids.get(1).unwrap_or(&self.switch_ids[0])
    }
}

/// Create the switches of one fabric, their peer link and the group box.
///
/// `offset_x` is measured from [`ORIGIN_X`]; the switches sit at `origin_y`.
pub fn build_fabric(
    builder: &mut TopologyBuilder,
    role: FabricRole,
    redundancy: Redundancy,
    offset_x: f64,
    origin_y: f64,
) -> Result<Fabric, TopologyError> {
    let unit_count = if redundancy.is_redundant() { 2 } else { 1 };
    let (switch_width, _) = DeviceClass::Switch.footprint();
    let first_x = ORIGIN_X + offset_x + GROUP_PADDING;

    let mut switch_ids = Vec::with_capacity(unit_count);
    for unit in 0..unit_count {
        let device = Device {
            id: format!("sw-{}-{:02}", role.key(), unit + 1),
            class: DeviceClass::Switch,
            label: format!("{}-SW-{}", role.label_prefix(), if unit == 0 { 'A' } else { 'B' }),
            sub_label: None,
            ip: Some(ip::switch_address(role, unit)),
            x: first_x + unit as f64 * (switch_width + SWITCH_GAP),
            y: origin_y,
            group_id: None,
            stack_count: None,
            combined_role: None,
            ports: Vec::new(),
            bonds: Vec::new(),
        };
        switch_ids.push(builder.add_device(device)?);
    }

    if let [a, b] = switch_ids.as_slice() {
        wire_peer_link(builder, role.peer_plane(), a, b)?;
    }

    // Content is never empty: at least one switch was added above
    let bounds = layout::enclose(builder.devices_by_id(&switch_ids)).unwrap_or(Rect {
        x: ORIGIN_X + offset_x,
        y: origin_y - GROUP_HEADER,
        width: 0.0,
        height: 0.0,
    });
    builder.add_group(&format!("grp-sw-{}", role.key()), role.group_title(), bounds, &switch_ids)?;

    debug!("Built {:?} fabric ({:?}) with switches {:?}", role, redundancy, switch_ids);
    Ok(Fabric { role, redundancy, switch_ids, bounds })
}

/// Join the two switches of a redundant fabric on their facing sides
fn wire_peer_link(builder: &mut TopologyBuilder, plane: Plane, left: &str, right: &str) -> Result<(), TopologyError> {
    let spec = plane.spec();
    let source_port = builder.add_port(left, "peer".to_string(), spec.port_names[0], PortSide::Right, plane)?;
    let target_port = builder.add_port(right, "peer".to_string(), spec.port_names[1], PortSide::Left, plane)?;
    builder.connect(Link {
        source: left.to_string(),
        source_port,
        target: right.to_string(),
        target_port,
        plane,
        speed: spec.speed.to_string(),
        lag: false,
    })
}

/// Fabric handles for every server plane
#[derive(Debug, Clone, Default)]
pub struct FabricSet {
    pub management: Option<Fabric>,
    pub business: Option<Fabric>,
    pub storage: Option<Fabric>,
    pub backup: Option<Fabric>,
    pub ipmi: Option<Fabric>,
}

impl FabricSet {
    pub fn for_plane(&self, plane: Plane) -> Option<&Fabric> {
        match plane {
            Plane::Management => self.management.as_ref(),
            Plane::Business => self.business.as_ref(),
            Plane::Storage => self.storage.as_ref(),
            Plane::Backup => self.backup.as_ref(),
            Plane::Ipmi => self.ipmi.as_ref(),
            Plane::Stack | Plane::Mlag => None,
        }
    }

    /// Distinct fabrics in build order
    pub fn distinct(&self) -> Vec<&Fabric> {
        let mut out: Vec<&Fabric> = Vec::new();
        for fabric in [&self.management, &self.business, &self.storage, &self.backup, &self.ipmi]
            .into_iter()
            .flatten()
        {
            if !out.iter().any(|f| f.role == fabric.role) {
                out.push(fabric);
            }
        }
        out
    }
}

/// Build the fabric row for a network configuration.
///
/// Returns the fabric handles and the first free vertical coordinate below
/// the row.
pub fn build_fabric_row(builder: &mut TopologyBuilder, network: &NetworkConfig) -> Result<(FabricSet, f64), TopologyError> {
    let mut fabrics = FabricSet::default();

    if network.is_converged() {
        if network.needs_core() {
            let core = build_fabric(builder, FabricRole::Core, network.core_redundancy, CORE_OFFSET_X, ORIGIN_Y)?;
            let share = |enabled: bool| if enabled { Some(core.clone()) } else { None };
            fabrics.management = share(network.enable_management);
            fabrics.business = share(network.enable_business);
            fabrics.storage = share(network.enable_storage);
            fabrics.backup = share(network.enable_backup);
        }
    } else {
        let mut offset_x = 0.0;
        let planes = [
            (network.enable_management, FabricRole::Management, network.management_redundancy),
            (network.enable_business, FabricRole::Business, network.business_redundancy),
            (network.enable_storage, FabricRole::Storage, network.storage_redundancy),
            (network.enable_backup, FabricRole::Backup, network.backup_redundancy),
        ];
        for (enabled, role, redundancy) in planes {
            if !enabled {
                continue;
            }
            let fabric = build_fabric(builder, role, redundancy, offset_x, ORIGIN_Y)?;
            offset_x += fabric.bounds.width + FABRIC_GAP;
            match role {
                FabricRole::Management => fabrics.management = Some(fabric),
                FabricRole::Business => fabrics.business = Some(fabric),
                FabricRole::Storage => fabrics.storage = Some(fabric),
                FabricRole::Backup => fabrics.backup = Some(fabric),
                FabricRole::Core | FabricRole::Ipmi => {}
            }
        }
    }

    if network.enable_ipmi {
        fabrics.ipmi = Some(build_fabric(builder, FabricRole::Ipmi, Redundancy::Single, IPMI_OFFSET_X, ORIGIN_Y)?);
    }

    let row_bottom = fabrics
        .distinct()
        .iter()
        .map(|f| f.bounds)
        .reduce(|a, b| if a.bottom() >= b.bottom() { a } else { b });
    let next_y = match row_bottom {
        Some(bounds) => layout::next_origin(&bounds),
        None => ORIGIN_Y,
    };

    info!("Built {} switch fabric(s); node layers start at y={}", fabrics.distinct().len(), next_y);
    Ok((fabrics, next_y))
}
