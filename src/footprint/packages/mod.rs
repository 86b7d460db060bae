//! Package layout algorithms.
//!
//! Each package topology has its own module implementing [`PackageLayout`]:
//! given a validated spec (lengths in mils), it places the pads in pin order
//! and draws the silkscreen outline. All output coordinates are on the
//! 1/10 mil grid.

pub mod dual_inline;
pub mod dual_row;
pub mod quad_no_lead;
pub mod single_inline;

use serde::{Deserialize, Serialize};

use crate::footprint::spec::{LayerMask, Mount, Package, PadShape};
use crate::footprint::units::{to_grid, GRID_PER_MIL};
use crate::footprint::validate::ValidatedSpec;

pub use dual_inline::DualInlineLayout;
pub use dual_row::DualRowConnectorLayout;
pub use quad_no_lead::QuadNoLeadLayout;
pub use single_inline::SingleInlineLayout;

/// Clearance added to the largest pad dimension to size the outline (mils).
pub const OUTLINE_CLEARANCE: f64 = 50.0;

/// Distance from the outline's top edge up to the reference text anchor.
pub const REF_TEXT_OFFSET: i64 = 400;

/// Radius of the pin 1 notch.
pub const NOTCH_RADIUS: i64 = 250;

/// Radius of the pin 1 locator dot.
pub const DOT_RADIUS: i64 = 100;

/// Distance of the locator dot centre outside the left outline edge.
pub const DOT_CLEARANCE: i64 = 250;

/// A placed pad, on the 1/10 mil grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadRecord {
    /// Pin number (1-based); also the pad name.
    pub number: u32,

    /// Copper shape.
    pub shape: PadShape,

    /// Size in X.
    pub size_x: i64,

    /// Size in Y.
    pub size_y: i64,

    /// Drill diameter; zero for surface mount.
    pub drill: i64,

    /// Mount type.
    pub mount: Mount,

    /// Layers the pad occupies.
    pub layer_mask: LayerMask,

    /// Centre X.
    pub x: i64,

    /// Centre Y.
    pub y: i64,
}

/// A silkscreen primitive, on the 1/10 mil grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlineSegment {
    /// Straight line.
    Line {
        /// Start X.
        x1: i64,
        /// Start Y.
        y1: i64,
        /// End X.
        x2: i64,
        /// End Y.
        y2: i64,
    },
    /// Full circle.
    Circle {
        /// Centre X.
        x: i64,
        /// Centre Y.
        y: i64,
        /// Radius.
        radius: i64,
    },
    /// Circular arc.
    Arc {
        /// Centre X.
        x: i64,
        /// Centre Y.
        y: i64,
        /// Radius.
        radius: i64,
        /// Start angle in tenths of a degree (0 = +X, 900 = +Y).
        start_angle: i32,
        /// Swept angle in tenths of a degree.
        extent: i32,
    },
}

impl OutlineSegment {
    /// Creates a line segment.
    #[must_use]
    pub const fn line(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self::Line { x1, y1, x2, y2 }
    }

    /// Returns the start point of an arc, or the centre of any other segment.
    ///
    /// Quarter-turn start angles are exact; others are rounded to the grid.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Grid coordinates fit in i64
    pub fn start_point(&self) -> (i64, i64) {
        match *self {
            Self::Line { x1, y1, .. } => (x1, y1),
            Self::Circle { x, y, .. } => (x, y),
            Self::Arc {
                x,
                y,
                radius,
                start_angle,
                ..
            } => match start_angle.rem_euclid(3600) {
                0 => (x.saturating_add(radius), y),
                900 => (x, y.saturating_add(radius)),
                1800 => (x.saturating_sub(radius), y),
                2700 => (x, y.saturating_sub(radius)),
                angle => {
                    let theta = (f64::from(angle) / 10.0).to_radians();
                    let r = radius as f64;
                    (
                        x.saturating_add((r * theta.cos()).round() as i64),
                        y.saturating_add((r * theta.sin()).round() as i64),
                    )
                }
            },
        }
    }
}

/// Result of a package layout: pads in pin order plus the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Pads, index `i` holding pin `i + 1`.
    pub pads: Vec<PadRecord>,

    /// Silkscreen outline and orientation marks.
    pub outline: Vec<OutlineSegment>,

    /// Y coordinate of the reference designator text.
    pub ref_text_y: i64,
}

/// Trait for package layout algorithms.
pub trait PackageLayout {
    /// Places pads and draws the outline for a validated spec.
    fn layout(&self, spec: &ValidatedSpec) -> Layout;
}

/// Returns the layout algorithm for a package topology.
#[must_use]
pub fn engine_for(package: Package) -> &'static dyn PackageLayout {
    match package {
        Package::SingleInline => &SingleInlineLayout,
        Package::DualInline => &DualInlineLayout,
        Package::DualRowConnector => &DualRowConnectorLayout,
        Package::QuadNoLead => &QuadNoLeadLayout,
    }
}

/// Scales a length in mils to grid units without truncating.
#[must_use]
pub fn scale(mils: f64) -> f64 {
    mils * GRID_PER_MIL
}

/// Truncates a grid-unit value toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Intentional: the legacy format truncates
pub fn snap(grid: f64) -> i64 {
    grid as i64
}

/// Outline margin in grid units: the largest pad dimension plus clearance.
#[must_use]
pub fn outline_margin(spec: &ValidatedSpec) -> f64 {
    let spec = spec.spec();
    scale(spec.pad_size_x.max(spec.pad_size_y) + OUTLINE_CLEARANCE)
}

/// Builds pad records sharing one spec's shape, size, drill and layers.
#[derive(Debug, Clone, Copy)]
pub struct PadFactory {
    shape: PadShape,
    size_x: i64,
    size_y: i64,
    drill: i64,
    mount: Mount,
    first_pad_square: bool,
}

impl PadFactory {
    /// Creates a factory from a validated spec.
    #[must_use]
    pub fn new(spec: &ValidatedSpec) -> Self {
        let spec = spec.spec();
        let drill = match spec.mount {
            Mount::ThroughHole => to_grid(spec.drill_diameter),
            Mount::SurfaceMount => 0,
        };

        Self {
            shape: spec.pad_shape,
            size_x: to_grid(spec.pad_size_x),
            size_y: to_grid(spec.pad_size_y),
            drill,
            mount: spec.mount,
            first_pad_square: spec.first_pad_square,
        }
    }

    /// Creates pad `number` at `(x, y)`.
    #[must_use]
    pub fn pad(&self, number: u32, x: i64, y: i64) -> PadRecord {
        let shape = if number == 1 && self.first_pad_square {
            PadShape::Rectangle
        } else {
            self.shape
        };

        PadRecord {
            number,
            shape,
            size_x: self.size_x,
            size_y: self.size_y,
            drill: self.drill,
            mount: self.mount,
            layer_mask: self.mount.layer_mask(),
            x,
            y,
        }
    }

    /// Creates pad `number` at `(x, y)` turned through 90 degrees.
    #[must_use]
    pub fn rotated_pad(&self, number: u32, x: i64, y: i64) -> PadRecord {
        let mut pad = self.pad(number, x, y);
        std::mem::swap(&mut pad.size_x, &mut pad.size_y);
        pad
    }
}

/// Axis-aligned outline bounds in (untruncated) grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub min_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Right edge.
    pub max_x: f64,
    /// Bottom edge.
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from edges.
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates bounds from the top-left corner and a size.
    #[must_use]
    pub fn from_origin(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self::new(min_x, min_y, min_x + width, min_y + height)
    }

    /// Grows every edge outward by `amount`.
    #[must_use]
    pub fn expand(self, amount: f64) -> Self {
        Self::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    /// Grows the top and bottom edges outward by `amount`.
    #[must_use]
    pub fn expand_y(self, amount: f64) -> Self {
        Self::new(self.min_x, self.min_y - amount, self.max_x, self.max_y + amount)
    }

    /// Returns the four edges: top, left, bottom, right.
    #[must_use]
    pub fn rectangle(&self) -> [OutlineSegment; 4] {
        let (x0, y0) = (snap(self.min_x), snap(self.min_y));
        let (x1, y1) = (snap(self.max_x), snap(self.max_y));
        [
            OutlineSegment::line(x0, y0, x1, y0),
            OutlineSegment::line(x0, y0, x0, y1),
            OutlineSegment::line(x0, y1, x1, y1),
            OutlineSegment::line(x1, y0, x1, y1),
        ]
    }

    /// Returns the reference text anchor above the top edge.
    #[must_use]
    pub fn ref_text_y(&self) -> i64 {
        snap(self.min_y).saturating_sub(REF_TEXT_OFFSET)
    }
}

/// Outline shared by the two-row packages: rectangle, pin 1 notch centred on
/// the top edge, and a locator dot outside the left edge level with row 1.
#[must_use]
pub fn two_row_outline(bounds: Bounds) -> Vec<OutlineSegment> {
    let mut outline = bounds.rectangle().to_vec();

    outline.push(OutlineSegment::Arc {
        x: snap((bounds.min_x + bounds.max_x) / 2.0),
        y: snap(bounds.min_y),
        radius: NOTCH_RADIUS,
        start_angle: 0,
        extent: 1800,
    });

    outline.push(OutlineSegment::Circle {
        x: snap(bounds.min_x).saturating_sub(DOT_CLEARANCE),
        y: 0,
        radius: DOT_RADIUS,
    });

    outline
}

/// Bounds of a two-row package whose rows are `row_spacing` apart.
#[must_use]
pub fn two_row_bounds(spec: &ValidatedSpec, rows: u32) -> Bounds {
    let pitch = scale(spec.spec().pitch);
    let width = scale(spec.row_spacing_x());
    let height = f64::from(rows.saturating_sub(1)) * pitch;

    Bounds::from_origin(0.0, 0.0, width, height).expand(outline_margin(spec) / 2.0)
}


#[cfg(test)]
mod tests {
    use super::test_support::validated;
    use super::*;
    use crate::footprint::spec::FootprintSpec;

    #[test]
    fn outline_clamps_at_grid_limits() {
        let bounds = Bounds::new(-2e19, -2e19, 2e19, 2e19);
        let outline = two_row_outline(bounds);

        assert_eq!(outline[0], OutlineSegment::line(i64::MIN, i64::MIN, i64::MAX, i64::MIN));
        assert_eq!(
            outline[5],
            OutlineSegment::Circle {
                x: i64::MIN,
                y: 0,
                radius: DOT_RADIUS
            }
        );
        assert_eq!(bounds.ref_text_y(), i64::MIN);
    }

    #[test]
    fn arc_start_points_are_exact_on_quarter_turns() {
        let arc = |start_angle| OutlineSegment::Arc {
            x: 100,
            y: 200,
            radius: 50,
            start_angle,
            extent: 900,
        };
        assert_eq!(arc(0).start_point(), (150, 200));
        assert_eq!(arc(900).start_point(), (100, 250));
        assert_eq!(arc(1800).start_point(), (50, 200));
        assert_eq!(arc(-900).start_point(), (100, 150));
        assert_eq!(arc(450).start_point(), (135, 235));
    }

    #[test]
    fn first_pad_square_only_affects_pin_one() {
        let mut spec = FootprintSpec::new("SIP4", Package::SingleInline);
        spec.first_pad_square = true;
        let factory = PadFactory::new(&validated(spec));

        assert_eq!(factory.pad(1, 0, 0).shape, PadShape::Rectangle);
        assert_eq!(factory.pad(2, 0, 0).shape, PadShape::Circle);
    }

    #[test]
    fn surface_mount_pads_have_no_drill() {
        let mut spec = FootprintSpec::new("SMD", Package::SingleInline);
        spec.mount = Mount::SurfaceMount;
        let pad = PadFactory::new(&validated(spec)).pad(1, 0, 0);

        assert_eq!(pad.drill, 0);
        assert_eq!(pad.layer_mask, Mount::SurfaceMount.layer_mask());
    }

    #[test]
    fn rotated_pad_swaps_sizes() {
        let mut spec = FootprintSpec::new("R", Package::SingleInline);
        spec.pad_shape = PadShape::Oblong;
        spec.pad_size_x = 60.0;
        spec.pad_size_y = 20.0;
        let pad = PadFactory::new(&validated(spec)).rotated_pad(3, 0, 0);

        assert_eq!((pad.size_x, pad.size_y), (200, 600));
    }

    #[test]
    fn engines_cover_every_package() {
        for package in Package::ALL {
            let _ = engine_for(package);
        }
    }

    #[test]
    fn rectangle_edges_are_closed() {
        let edges = Bounds::new(-600.0, -600.0, 7600.0, 600.0).rectangle();
        assert_eq!(edges[0], OutlineSegment::line(-600, -600, 7600, -600));
        assert_eq!(edges[1], OutlineSegment::line(-600, -600, -600, 600));
        assert_eq!(edges[2], OutlineSegment::line(-600, 600, 7600, 600));
        assert_eq!(edges[3], OutlineSegment::line(7600, -600, 7600, 600));
    }
}
