//! Mil / millimetre conversion and the internal coordinate grid.
//!
//! Layout is computed in mils. Coordinates are then truncated onto a
//! fixed-point grid of 1/10 mil, the resolution of the legacy module format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::footprint::error::{FootprintError, FootprintResult};
use crate::footprint::spec::FootprintSpec;

/// Millimetres per inch.
const MM_PER_INCH: f64 = 25.4;

/// Mils per inch.
const MILS_PER_INCH: f64 = 1000.0;

/// Grid subdivisions per mil.
pub const GRID_PER_MIL: f64 = 10.0;

/// Unit a footprint's linear parameters are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Thousandths of an inch.
    #[default]
    #[serde(alias = "mils", alias = "thou")]
    Mil,
    /// Millimetres.
    #[serde(alias = "millimetre", alias = "millimeter", alias = "millimetres")]
    Mm,
}

impl Units {
    /// Converts `value` from `self` into mils.
    #[must_use]
    pub fn to_mils(self, value: f64) -> f64 {
        match self {
            Self::Mil => value,
            Self::Mm => mm_to_mil(value),
        }
    }

    /// Converts `value` (in `self` units) into `target` units.
    #[must_use]
    pub fn convert(self, value: f64, target: Self) -> f64 {
        match (self, target) {
            (Self::Mm, Self::Mil) => mm_to_mil(value),
            (Self::Mil, Self::Mm) => mil_to_mm(value),
            _ => value,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mil => write!(f, "mil"),
            Self::Mm => write!(f, "mm"),
        }
    }
}

impl FromStr for Units {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mil" | "mils" | "thou" => Ok(Self::Mil),
            "mm" | "millimetre" | "millimeter" | "millimetres" | "millimeters" => Ok(Self::Mm),
            _ => Err(FootprintError::unit_conversion(s)),
        }
    }
}

/// Converts mils to millimetres.
#[must_use]
pub fn mil_to_mm(mils: f64) -> f64 {
    mils * MM_PER_INCH / MILS_PER_INCH
}

/// Converts millimetres to mils.
#[must_use]
pub fn mm_to_mil(mm: f64) -> f64 {
    mm * MILS_PER_INCH / MM_PER_INCH
}

/// Parses a decimal length.
///
/// # Errors
///
/// Returns [`FootprintError::UnitConversion`] if the text is not a finite number.
pub fn parse_length(text: &str) -> FootprintResult<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| FootprintError::unit_conversion(text))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(FootprintError::unit_conversion(text))
    }
}

/// Parses `text` as a length in `from` units and converts it to `to` units.
///
/// # Errors
///
/// Returns [`FootprintError::UnitConversion`] if the text is not a finite number.
pub fn convert_text(text: &str, from: Units, to: Units) -> FootprintResult<f64> {
    parse_length(text).map(|value| from.convert(value, to))
}

/// Formats a converted length with six decimal digits.
#[must_use]
pub fn format_length(value: f64) -> String {
    format!("{value:.6}")
}

/// Rewrites every linear dimension of `spec` from `units` into mils.
#[must_use]
pub fn normalise_to_mils(mut spec: FootprintSpec, units: Units) -> FootprintSpec {
    let to_mils = |v: f64| units.to_mils(v);

    spec.pitch = to_mils(spec.pitch);
    spec.pad_size_x = to_mils(spec.pad_size_x);
    spec.pad_size_y = to_mils(spec.pad_size_y);
    spec.drill_diameter = to_mils(spec.drill_diameter);
    spec.row_spacing_x = spec.row_spacing_x.map(to_mils);
    spec.row_spacing_y = spec.row_spacing_y.map(to_mils);
    spec.units = Some(Units::Mil);
    spec
}

/// Truncates a length in mils onto the 1/10 mil grid.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Intentional: the legacy format truncates
pub fn to_grid(mils: f64) -> i64 {
    (mils * GRID_PER_MIL) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_mil_is_two_point_five_four_mm() {
        assert!((mil_to_mm(100.0) - 2.54).abs() < 1e-9);
        assert!((mm_to_mil(2.54) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_within_tolerance() {
        for x in [0.001, 0.1, 0.5, 1.0, 1.27, 2.54, 3.3, 10.0, 123.456, 9999.0] {
            assert!((mil_to_mm(mm_to_mil(x)) - x).abs() < 1e-6, "round trip failed for {x}");
            assert!((mm_to_mil(mil_to_mm(x)) - x).abs() < 1e-6, "round trip failed for {x}");
        }
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!(matches!(
            parse_length("12mm"),
            Err(FootprintError::UnitConversion { .. })
        ));
        assert!(parse_length("").is_err());
        assert!(parse_length("NaN").is_err());
        assert!(parse_length("inf").is_err());
        assert!((parse_length(" 1.5 ").unwrap() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn convert_text_formats_like_converter_tool() {
        let mils = convert_text("1", Units::Mm, Units::Mil).unwrap();
        assert_eq!(format_length(mils), "39.370079");
        let mm = convert_text("100", Units::Mil, Units::Mm).unwrap();
        assert_eq!(format_length(mm), "2.540000");
    }

    #[test]
    fn grid_truncates_toward_zero() {
        assert_eq!(to_grid(100.0), 1000);
        assert_eq!(to_grid(3.937), 39);
        assert_eq!(to_grid(-60.05), -600);
    }

    #[test]
    fn normalise_leaves_counts_alone() {
        use crate::footprint::spec::Package;

        let mut spec = FootprintSpec::new("QFN", Package::QuadNoLead);
        spec.units = Some(Units::Mm);
        spec.pitch = 0.5;
        spec.row_spacing_x = Some(2.54);
        spec.row_spacing_y = None;
        spec.pins_per_horizontal_edge = Some(4);

        let spec = normalise_to_mils(spec, Units::Mm);
        assert_eq!(spec.units, Some(Units::Mil));
        assert!((spec.pitch - 19.685_039).abs() < 1e-6);
        assert!((spec.row_spacing_x.unwrap() - 100.0).abs() < 1e-9);
        assert_eq!(spec.row_spacing_y, None);
        assert_eq!(spec.pins_per_horizontal_edge, Some(4));
        assert_eq!(spec.pin_count, 8);
    }

    #[test]
    fn units_parse() {
        assert_eq!("MM".parse::<Units>().unwrap(), Units::Mm);
        assert_eq!("mils".parse::<Units>().unwrap(), Units::Mil);
        assert!("inch".parse::<Units>().is_err());
    }
}
