//! Parameter validation.
//!
//! Validation is all-or-nothing: rules are checked in a fixed order and the
//! first violation aborts with that rule's [`Parameter`]. Each parameter
//! carries a safe default an interactive caller may substitute before
//! retrying.

use std::fmt;

use tracing::debug;

use crate::footprint::error::{FootprintError, FootprintResult};
use crate::footprint::spec::{FootprintSpec, Mount, Package, PadShape};
use crate::footprint::units::{normalise_to_mils, to_grid, Units};

/// Tolerance used when comparing pad dimensions for equality.
const SIZE_EPSILON: f64 = 1e-9;

/// A validated parameter of a [`FootprintSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Pin pitch.
    Pitch,
    /// Pad size in X.
    PadSizeX,
    /// Pad size in Y.
    PadSizeY,
    /// Drill diameter.
    DrillDiameter,
    /// Number of pins.
    PinCount,
    /// Row spacing in X.
    RowSpacingX,
    /// Row spacing in Y.
    RowSpacingY,
    /// Pins on each vertical edge of a quad package.
    PinsPerHorizontalEdge,
    /// Pad shape versus pad dimensions.
    PadShape,
    /// Module name.
    ModuleName,
}

impl Parameter {
    /// Returns the rule name reported on failure.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pitch => "pitch",
            Self::PadSizeX => "padSizeX",
            Self::PadSizeY => "padSizeY",
            Self::DrillDiameter => "drillDiameter",
            Self::PinCount => "pinCount",
            Self::RowSpacingX => "rowSpacingX",
            Self::RowSpacingY => "rowSpacingY",
            Self::PinsPerHorizontalEdge => "pinsPerHorizontalEdge",
            Self::PadShape => "padShape",
            Self::ModuleName => "moduleName",
        }
    }

    /// Returns a value that satisfies this parameter's rule, in mils
    /// (or a plain count), if one exists.
    #[must_use]
    pub const fn safe_default(&self) -> Option<f64> {
        match self {
            Self::Pitch => Some(100.0),
            Self::PadSizeX | Self::PadSizeY => Some(70.0),
            Self::DrillDiameter => Some(35.0),
            Self::PinCount => Some(8.0),
            Self::RowSpacingX | Self::RowSpacingY => Some(300.0),
            Self::PinsPerHorizontalEdge => Some(2.0),
            Self::PadShape | Self::ModuleName => None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exclusive upper bound for the pitch.
const fn max_pitch(units: Units) -> f64 {
    match units {
        Units::Mil => 400.0,
        Units::Mm => 10.0,
    }
}

/// Drill range: exclusive lower bound, inclusive upper bound.
const fn drill_range(units: Units) -> (f64, f64) {
    match units {
        Units::Mil => (10.0, 250.0),
        Units::Mm => (0.254, 6.1),
    }
}

/// A spec that has passed validation, with every length in mils.
///
/// Only [`validate`] constructs this type, so the layout engine never sees
/// unchecked input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSpec {
    spec: FootprintSpec,
    source_units: Units,
}

impl ValidatedSpec {
    /// Returns the validated parameters (lengths in mils).
    #[must_use]
    pub const fn spec(&self) -> &FootprintSpec {
        &self.spec
    }

    /// Returns the units the request was originally expressed in.
    #[must_use]
    pub const fn source_units(&self) -> Units {
        self.source_units
    }

    /// Returns the package topology.
    #[must_use]
    pub const fn package(&self) -> Package {
        self.spec.package
    }

    /// Returns the row spacing in X (mils); zero for single inline packages.
    #[must_use]
    pub fn row_spacing_x(&self) -> f64 {
        self.spec.row_spacing_x.unwrap_or_default()
    }

    /// Returns the row spacing in Y (mils); zero for non-quad packages.
    #[must_use]
    pub fn row_spacing_y(&self) -> f64 {
        self.spec.row_spacing_y.unwrap_or_default()
    }

    /// Returns the per-edge pin count of a quad package; zero otherwise.
    #[must_use]
    pub fn pins_per_horizontal_edge(&self) -> u32 {
        self.spec.pins_per_horizontal_edge.unwrap_or_default()
    }
}

fn check(ok: bool, parameter: Parameter, message: impl FnOnce() -> String) -> FootprintResult<()> {
    if ok {
        Ok(())
    } else {
        Err(FootprintError::invalid_parameter(parameter, message()))
    }
}

fn positive(value: Option<f64>) -> bool {
    value.is_some_and(|v| v > 0.0 && v.is_finite())
}

/// Largest coordinate magnitude the module format carries (32-bit).
const MAX_GRID: i64 = 0x7FFF_FFFF;

/// Returns `true` if a positive length in `units` is representable on the grid.
fn on_grid(value: Option<f64>, units: Units) -> bool {
    positive(value) && value.is_some_and(|v| to_grid(units.to_mils(v)) <= MAX_GRID)
}

fn out_of_grid(value: f64, units: Units) -> String {
    format!("{value} {units} must be greater than zero and at most {} mil", MAX_GRID / 10)
}

/// Validates `spec` and normalises it to mils.
///
/// `default_units` applies when the spec does not declare its units. Empty
/// description and keywords are replaced by the module name.
///
/// # Errors
///
/// Returns [`FootprintError::InvalidParameter`] naming the first violated rule.
pub fn validate(mut spec: FootprintSpec, default_units: Units) -> FootprintResult<ValidatedSpec> {
    let units = spec.units_or(default_units);

    let max = max_pitch(units);
    check(
        spec.pitch > 0.0 && spec.pitch < max,
        Parameter::Pitch,
        || format!("{} {units} is outside (0, {max}) {units}", spec.pitch),
    )?;

    check(on_grid(Some(spec.pad_size_x), units), Parameter::PadSizeX, || {
        out_of_grid(spec.pad_size_x, units)
    })?;

    check(on_grid(Some(spec.pad_size_y), units), Parameter::PadSizeY, || {
        out_of_grid(spec.pad_size_y, units)
    })?;

    if spec.mount == Mount::ThroughHole {
        let (min, max) = drill_range(units);
        check(
            spec.drill_diameter > min && spec.drill_diameter <= max,
            Parameter::DrillDiameter,
            || format!("{} {units} is outside ({min}, {max}] {units}", spec.drill_diameter),
        )?;
    }

    check(spec.pin_count > 1, Parameter::PinCount, || {
        format!("{} pins; at least 2 required", spec.pin_count)
    })?;
    if spec.package.requires_even_pins() {
        check(spec.pin_count % 2 == 0, Parameter::PinCount, || {
            format!("{} pins; {} needs an even count", spec.pin_count, spec.package)
        })?;
    }

    if spec.package != Package::SingleInline {
        check(on_grid(spec.row_spacing_x, units), Parameter::RowSpacingX, || {
            format!("{} needs a row spacing in X within the module grid", spec.package)
        })?;
    }

    if spec.package == Package::QuadNoLead {
        check(on_grid(spec.row_spacing_y, units), Parameter::RowSpacingY, || {
            format!("{} needs a row spacing in Y within the module grid", spec.package)
        })?;

        let per_edge = spec.pins_per_horizontal_edge.unwrap_or_default();
        check(per_edge > 0, Parameter::PinsPerHorizontalEdge, || {
            format!("{} needs at least one pin per edge", spec.package)
        })?;
        check(
            u64::from(per_edge) * 2 <= u64::from(spec.pin_count),
            Parameter::PinsPerHorizontalEdge,
            || format!("2 x {per_edge} edge pins exceed {} pins", spec.pin_count),
        )?;
    }

    let same_size = (spec.pad_size_x - spec.pad_size_y).abs() < SIZE_EPSILON;
    match spec.pad_shape {
        PadShape::Circle => check(same_size, Parameter::PadShape, || {
            "circular pads need equal X and Y sizes".to_string()
        })?,
        PadShape::Oblong => check(!same_size, Parameter::PadShape, || {
            "oblong pads need different X and Y sizes".to_string()
        })?,
        PadShape::Rectangle => {}
    }

    let name = spec.module_name.trim();
    check(
        !name.is_empty() && !name.contains(['/', '\\']),
        Parameter::ModuleName,
        || format!("'{}' cannot be used as a module file name", spec.module_name),
    )?;
    spec.module_name = name.to_string();

    if spec.description.is_empty() {
        spec.description.clone_from(&spec.module_name);
    }
    if spec.keywords.is_empty() {
        spec.keywords.clone_from(&spec.module_name);
    }

    debug!(
        module = %spec.module_name,
        package = %spec.package,
        units = %units,
        "Parameters validated"
    );

    Ok(ValidatedSpec {
        spec: normalise_to_mils(spec, units),
        source_units: units,
    })
}
