//! Address plan.
//!
//! Switches take host addresses from their fabric role's management prefix.
//! Servers are numbered inside a per-class /24 starting at a fixed host
//! offset. The plan is a reference only; no subnet sizing is checked.

use crate::graph::DeviceClass;
use crate::topology::FabricRole;

/// First host number handed to servers
pub const SERVER_HOST_OFFSET: usize = 11;

/// Management prefix of a fabric role
pub fn role_prefix(role: FabricRole) -> &'static str {
    match role {
        FabricRole::Management => "192.168.0",
        FabricRole::Core | FabricRole::Business => "192.168.1",
        FabricRole::Storage => "192.168.2",
        FabricRole::Backup => "192.168.3",
        FabricRole::Ipmi => "192.168.9",
    }
}

/// Address of the `unit`-th switch (0 = A, 1 = B) of a fabric
pub fn switch_address(role: FabricRole, unit: usize) -> String {
    format!("{}.{}", role_prefix(role), unit + 1)
}

/// Prefix of the server /24 for a device class
pub fn server_prefix(class: DeviceClass) -> Option<&'static str> {
    match class {
        DeviceClass::Management => Some("192.168.10"),
        DeviceClass::Compute => Some("192.168.11"),
        DeviceClass::Storage => Some("192.168.12"),
        DeviceClass::Switch => None,
    }
}

/// Address of the `index`-th server of a class
pub fn server_address(class: DeviceClass, index: usize) -> Option<String> {
    server_prefix(class).map(|prefix| format!("{}.{}", prefix, SERVER_HOST_OFFSET + index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_switch_addresses() {
        assert_eq!(switch_address(FabricRole::Core, 0), "192.168.1.1");
        assert_eq!(switch_address(FabricRole::Core, 1), "192.168.1.2");
        assert_eq!(switch_address(FabricRole::Ipmi, 0), "192.168.9.1");
    }

    #[test]
    fn test_server_addresses_unique_across_classes() {
        let mut seen = HashSet::new();
        for class in [DeviceClass::Management, DeviceClass::Compute, DeviceClass::Storage] {
            for index in 0..16 {
                let ip = server_address(class, index).unwrap();
                assert!(ip.parse::<std::net::Ipv4Addr>().is_ok(), "{} should be valid", ip);
                assert!(seen.insert(ip));
            }
        }
        assert_eq!(server_address(DeviceClass::Switch, 0), None);
    }
}
