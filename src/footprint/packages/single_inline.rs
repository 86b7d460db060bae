//! Single inline (SIP) layout.
//!
//! Pins sit in one row along +X at the pin pitch. The self-locking variant
//! staggers alternate pads above and below the row so a header is gripped
//! by the holes; the outline grows slightly to clear the stagger.

use crate::footprint::packages::{
    outline_margin, scale, snap, Bounds, Layout, PackageLayout, PadFactory,
};
use crate::footprint::units::to_grid;
use crate::footprint::validate::ValidatedSpec;

/// Stagger of self-locking pads either side of the row (mils).
pub const LOCK_OFFSET: f64 = 5.0;

/// Extra outline height of the self-locking variant (grid units).
const LOCK_ALLOWANCE: f64 = 10.0;

/// Calculator for single inline packages.
#[derive(Debug, Default)]
pub struct SingleInlineLayout;

impl SingleInlineLayout {
    /// Creates a new single inline layout.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the Y offset of pad `index` (0-based).
    fn pad_y(index: u32, locking: bool) -> i64 {
        if !locking {
            return 0;
        }
        let offset = to_grid(LOCK_OFFSET);
        if index % 2 == 0 {
            offset
        } else {
            -offset
        }
    }
}

impl PackageLayout for SingleInlineLayout {
    fn layout(&self, spec: &ValidatedSpec) -> Layout {
        let params = spec.spec();
        let factory = PadFactory::new(spec);
        let pitch = scale(params.pitch);
        let locking = params.self_locking;

        let pads = (0..params.pin_count)
            .map(|i| {
                let x = snap(f64::from(i) * pitch);
                factory.pad(i + 1, x, Self::pad_y(i, locking))
            })
            .collect();

        // The locking allowance only grows the outline vertically; the
        // reference text stays anchored to the plain outline.
        let margin = outline_margin(spec);
        let width = f64::from(params.pin_count - 1) * pitch + margin;
        let plain = Bounds::from_origin(margin / -2.0, margin / -2.0, width, margin);
        let bounds = if locking {
            plain.expand_y(LOCK_ALLOWANCE / 2.0)
        } else {
            plain
        };

        Layout {
            pads,
            outline: bounds.rectangle().to_vec(),
            ref_text_y: plain.ref_text_y(),
        }
    }
}
