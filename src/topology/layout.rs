//! Layout accumulation.
//!
//! Devices sit on an implicit grid. Fabrics share one row at the top of the
//! canvas and device layers are stacked below it, each layer starting under
//! the bottom edge of everything placed before it. Group boxes are always
//! derived from the devices they enclose, so as long as vertical origins are
//! threaded monotonically no two groups can overlap.

use crate::graph::{Device, Rect};

/// Horizontal origin shared by fabrics and layers
pub const ORIGIN_X: f64 = 100.0;
/// Vertical coordinate of the fabric row
pub const ORIGIN_Y: f64 = 60.0;

pub const COLUMN_PITCH: f64 = 140.0;
pub const ROW_PITCH: f64 = 160.0;
/// Devices per grid row before wrapping
pub const ROW_CAPACITY: usize = 8;
/// Extra shift applied to layers when every plane has its own fabric
pub const SEPARATED_SHIFT_X: f64 = COLUMN_PITCH * 1.5;

/// Horizontal clearance between the two switches of a redundant fabric
pub const SWITCH_GAP: f64 = 120.0;
/// Horizontal gap between neighbouring fabric groups
pub const FABRIC_GAP: f64 = 40.0;
/// Offset of the converged core fabric from the origin
pub const CORE_OFFSET_X: f64 = COLUMN_PITCH * 2.5;
/// The out-of-band fabric floats left of the fabric row
pub const IPMI_OFFSET_X: f64 = -220.0;

/// Group padding left and right of the content
pub const GROUP_PADDING: f64 = 40.0;
/// Room above the content for the group title
pub const GROUP_HEADER: f64 = 60.0;
/// Room below the content for device labels
pub const LABEL_CLEARANCE: f64 = 40.0;
/// Vertical corridor between stacked groups
pub const SECTION_GAP: f64 = 60.0;

/// Grid coordinates of the `index`-th device of a layer whose content
/// starts at `top`
pub fn grid_position(index: usize, top: f64, separated: bool) -> (f64, f64) {
    let row = index / ROW_CAPACITY;
    let col = index % ROW_CAPACITY;
    let shift = if separated { SEPARATED_SHIFT_X } else { 0.0 };
    (
        ORIGIN_X + col as f64 * COLUMN_PITCH + shift,
        top + row as f64 * ROW_PITCH,
    )
}

/// Group box enclosing the given devices plus the fixed padding
pub fn enclose<'a, I>(devices: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Device>,
{
    Rect::union(devices.into_iter().map(Device::bounds)).map(|content| Rect {
        x: content.x - GROUP_PADDING,
        y: content.y - GROUP_HEADER,
        width: content.width + 2.0 * GROUP_PADDING,
        height: content.height + GROUP_HEADER + LABEL_CLEARANCE,
    })
}

/// First free vertical coordinate below a group
pub fn next_origin(group: &Rect) -> f64 {
    group.bottom() + SECTION_GAP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DeviceClass;

    fn device(class: DeviceClass, x: f64, y: f64) -> Device {
        Device {
            id: format!("d-{}-{}", x, y),
            class,
            label: String::new(),
            sub_label: None,
            ip: None,
            x,
            y,
            group_id: None,
            stack_count: None,
            combined_role: None,
            ports: Vec::new(),
            bonds: Vec::new(),
        }
    }

    #[test]
    fn test_grid_wraps_after_row_capacity() {
        assert_eq!(grid_position(0, 260.0, false), (100.0, 260.0));
        assert_eq!(grid_position(7, 260.0, false), (100.0 + 7.0 * 140.0, 260.0));
        assert_eq!(grid_position(8, 260.0, false), (100.0, 420.0));
        assert_eq!(grid_position(0, 260.0, true), (310.0, 260.0));
    }

    #[test]
    fn test_enclose_single_and_redundant_switch() {
        let single = enclose(&[device(DeviceClass::Switch, 140.0, 60.0)]).unwrap();
        assert_eq!(single, Rect { x: 100.0, y: 0.0, width: 140.0, height: 140.0 });

        let pair = [
            device(DeviceClass::Switch, 140.0, 60.0),
            device(DeviceClass::Switch, 140.0 + 60.0 + SWITCH_GAP, 60.0),
        ];
        let double = enclose(&pair).unwrap();
        assert_eq!(double.width, 60.0 * 2.0 + SWITCH_GAP + 2.0 * GROUP_PADDING);
        assert_eq!(double.height, single.height);
    }

    #[test]
    fn test_enclose_empty() {
        let none: [Device; 0] = [];
        assert!(enclose(&none).is_none());
    }

    #[test]
    fn test_next_origin_leaves_corridor() {
        let group = Rect { x: 0.0, y: 0.0, width: 10.0, height: 140.0 };
        assert_eq!(next_origin(&group), 200.0);
    }
}
