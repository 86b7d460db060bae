//! Dual inline (DIP) layout.
//!
//! Pins run down the left column and back up the right column, so pin
//! `N/2 + 1` sits opposite pin `N/2` and pin `N` opposite pin 1.

use crate::footprint::packages::{
    scale, snap, two_row_bounds, two_row_outline, Layout, PackageLayout, PadFactory,
};
use crate::footprint::units::to_grid;
use crate::footprint::validate::ValidatedSpec;

/// Calculator for dual inline packages.
#[derive(Debug, Default)]
pub struct DualInlineLayout;

impl DualInlineLayout {
    /// Creates a new dual inline layout.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PackageLayout for DualInlineLayout {
    fn layout(&self, spec: &ValidatedSpec) -> Layout {
        let params = spec.spec();
        let factory = PadFactory::new(spec);
        let pitch = scale(params.pitch);
        let right = to_grid(spec.row_spacing_x());
        let rows = params.pin_count / 2;

        let left_column = (0..rows).map(|row| factory.pad(row + 1, 0, snap(f64::from(row) * pitch)));
        let right_column = (0..rows).map(|k| {
            let row = rows - 1 - k;
            factory.pad(rows + k + 1, right, snap(f64::from(row) * pitch))
        });
        let pads = left_column.chain(right_column).collect();

        let bounds = two_row_bounds(spec, rows);

        Layout {
            pads,
            outline: two_row_outline(bounds),
            ref_text_y: bounds.ref_text_y(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::packages::test_support::validated;
    use crate::footprint::packages::{OutlineSegment, DOT_RADIUS, NOTCH_RADIUS};
    use crate::footprint::spec::{FootprintSpec, Package};

    fn dip(pins: u32) -> FootprintSpec {
        let mut spec = FootprintSpec::new(format!("DIP{pins}"), Package::DualInline);
        spec.pin_count = pins;
        spec.row_spacing_x = Some(300.0);
        spec
    }

    fn positions(layout: &Layout) -> Vec<(i64, i64)> {
        layout.pads.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn dip8_numbering_runs_down_and_back_up() {
        let layout = DualInlineLayout::new().layout(&validated(dip(8)));

        assert_eq!(
            positions(&layout),
            vec![
                (0, 0),
                (0, 1000),
                (0, 2000),
                (0, 3000),
                (3000, 3000),
                (3000, 2000),
                (3000, 1000),
                (3000, 0),
            ]
        );
    }

    #[test]
    fn second_half_shares_the_right_column() {
        for pins in [4, 14, 40] {
            let layout = DualInlineLayout::new().layout(&validated(dip(pins)));
            let half = pins as usize / 2;

            assert_eq!(layout.pads.len(), pins as usize);
            assert_eq!(layout.pads[half].x, 3000);
            assert_eq!(layout.pads[half].x, layout.pads[pins as usize - 1].x);
            assert_eq!(layout.pads[pins as usize - 1].y, 0);
            let numbers: Vec<u32> = layout.pads.iter().map(|p| p.number).collect();
            assert_eq!(numbers, (1..=pins).collect::<Vec<_>>());
        }
    }

    #[test]
    fn outline_has_rectangle_notch_and_dot() {
        let layout = DualInlineLayout::new().layout(&validated(dip(8)));

        assert_eq!(layout.outline.len(), 6);
        assert_eq!(layout.outline[0], OutlineSegment::line(-600, -600, 3600, -600));
        assert_eq!(layout.outline[3], OutlineSegment::line(3600, -600, 3600, 3600));
        assert_eq!(
            layout.outline[4],
            OutlineSegment::Arc {
                x: 1500,
                y: -600,
                radius: NOTCH_RADIUS,
                start_angle: 0,
                extent: 1800,
            }
        );
        assert_eq!(
            layout.outline[5],
            OutlineSegment::Circle {
                x: -850,
                y: 0,
                radius: DOT_RADIUS,
            }
        );
        assert_eq!(layout.ref_text_y, -1000);
    }
}
