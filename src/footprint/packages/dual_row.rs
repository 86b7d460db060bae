//! Dual row connector (pin header) layout.
//!
//! Pins are numbered across the rows: odd pin numbers in the right column,
//! even ones in the left, so pins 1 and 2 share the first row.

use crate::footprint::packages::{
    scale, snap, two_row_bounds, two_row_outline, Layout, PackageLayout, PadFactory,
};
use crate::footprint::units::to_grid;
use crate::footprint::validate::ValidatedSpec;

/// Calculator for dual row connectors.
#[derive(Debug, Default)]
pub struct DualRowConnectorLayout;

impl DualRowConnectorLayout {
    /// Creates a new dual row connector layout.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PackageLayout for DualRowConnectorLayout {
    fn layout(&self, spec: &ValidatedSpec) -> Layout {
        let params = spec.spec();
        let factory = PadFactory::new(spec);
        let pitch = scale(params.pitch);
        let right = to_grid(spec.row_spacing_x());

        let pads = (0..params.pin_count)
            .map(|i| {
                let x = if i % 2 == 0 { right } else { 0 };
                let y = snap(f64::from(i / 2) * pitch);
                factory.pad(i + 1, x, y)
            })
            .collect();

        let bounds = two_row_bounds(spec, params.pin_count / 2);

        Layout {
            pads,
            outline: two_row_outline(bounds),
            ref_text_y: bounds.ref_text_y(),
        }
    }
}
