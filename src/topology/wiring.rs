//! Port and bond allocation for server uplinks.

use log::debug;

use super::builder::{TopologyBuilder, TopologyError};
use super::fabric::Fabric;
use crate::graph::{Link, PortSide};
use crate::plane::Plane;

/// Wire one device into one plane's fabric.
///
/// A single-homed device gets one port cabled to the primary switch. A
/// dual-homed device gets two ports bonded into a LAG; the second leg goes
/// to the secondary switch when the fabric is redundant and to another
/// downstream port of the primary switch otherwise.
pub fn wire_uplinks(
    builder: &mut TopologyBuilder,
    device_id: &str,
    plane: Plane,
    fabric: &Fabric,
    dual_homed: bool,
) -> Result<(), TopologyError> {
    let spec = plane.spec();
    let legs = if dual_homed { 2 } else { 1 };

    let mut ports = Vec::with_capacity(legs);
    for leg in 0..legs {
        let port_id = format!("{}-{}", spec.key, leg);
        ports.push(builder.add_port(device_id, port_id, spec.port_names[leg], PortSide::Top, plane)?);
    }
    if dual_homed {
        builder.add_bond(device_id, plane, ports.clone())?;
    }

    for (leg, port) in ports.into_iter().enumerate() {
        let switch_id = if leg == 0 { fabric.primary() } else { fabric.secondary() };
        let target_port = builder.allocate_downstream_port(switch_id, plane)?;
        builder.connect(Link {
            source: device_id.to_string(),
            source_port: port,
            target: switch_id.to_string(),
            target_port,
            plane,
            speed: spec.speed.to_string(),
            lag: dual_homed,
        })?;
    }

    debug!(
        "Wired {} to {} fabric on {} ({})",
        device_id,
        plane,
        fabric.switch_ids.join("/"),
        if dual_homed { "LAG" } else { "single" }
    );
    Ok(())
}
