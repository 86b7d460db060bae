//! Quad no-lead (QFN) layout.
//!
//! Pads are placed anticlockwise from the top of the left edge: down the
//! left edge, along the bottom, up the right edge and back along the top.
//! Pads on the bottom and top edges are turned through 90 degrees.
//!
//! The pad frame has its left edge at `x = 0`, right edge at the X row
//! spacing, top edge at `y = 0` and bottom edge at the Y row spacing. Each
//! edge's pads are centred on that edge.

use crate::footprint::packages::{
    outline_margin, scale, snap, Bounds, Layout, OutlineSegment, PackageLayout, PadFactory,
    NOTCH_RADIUS,
};
use crate::footprint::validate::ValidatedSpec;

/// Calculator for quad no-lead packages.
#[derive(Debug, Default)]
pub struct QuadNoLeadLayout;

/// Pin counts on each edge, in placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeCounts {
    /// Left edge (and right edge) pin count.
    pub side: u32,
    /// Bottom edge pin count.
    pub bottom: u32,
    /// Top edge pin count; takes the odd pin when there is one.
    pub top: u32,
}

impl EdgeCounts {
    /// Splits `pin_count` given the pins on each vertical edge.
    #[must_use]
    pub const fn split(pin_count: u32, side: u32) -> Self {
        let remaining = pin_count.saturating_sub(2 * side);
        let bottom = remaining / 2;
        Self {
            side,
            bottom,
            top: remaining - bottom,
        }
    }
}

/// Grid position of pad `k` of `count` pads centred on an edge of `span`.
fn along_edge(span: f64, count: u32, pitch: f64, k: u32) -> i64 {
    let start = (span - f64::from(count.saturating_sub(1)) * pitch) / 2.0;
    snap(f64::from(k).mul_add(pitch, start))
}

impl QuadNoLeadLayout {
    /// Creates a new quad no-lead layout.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PackageLayout for QuadNoLeadLayout {
    fn layout(&self, spec: &ValidatedSpec) -> Layout {
        let params = spec.spec();
        let factory = PadFactory::new(spec);
        let pitch = scale(params.pitch);
        let width = scale(spec.row_spacing_x());
        let height = scale(spec.row_spacing_y());
        let (right, bottom) = (snap(width), snap(height));
        let counts = EdgeCounts::split(params.pin_count, spec.pins_per_horizontal_edge());

        let mut pads = Vec::with_capacity(params.pin_count as usize);
        let mut number = 0;
        let mut next = || {
            number += 1;
            number
        };

        for k in 0..counts.side {
            pads.push(factory.pad(next(), 0, along_edge(height, counts.side, pitch, k)));
        }
        for k in 0..counts.bottom {
            let x = along_edge(width, counts.bottom, pitch, k);
            pads.push(factory.rotated_pad(next(), x, bottom));
        }
        for k in (0..counts.side).rev() {
            pads.push(factory.pad(next(), right, along_edge(height, counts.side, pitch, k)));
        }
        for k in (0..counts.top).rev() {
            let x = along_edge(width, counts.top, pitch, k);
            pads.push(factory.rotated_pad(next(), x, 0));
        }

        let bounds = Bounds::from_origin(0.0, 0.0, width, height).expand(outline_margin(spec) / 2.0);
        let mut outline = bounds.rectangle().to_vec();
        outline.push(OutlineSegment::Arc {
            x: snap(bounds.min_x),
            y: snap(bounds.min_y),
            radius: NOTCH_RADIUS,
            start_angle: 0,
            extent: 900,
        });

        Layout {
            pads,
            outline,
            ref_text_y: bounds.ref_text_y(),
        }
    }
}
