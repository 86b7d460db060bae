//! Footprint generation request types.
//!
//! A [`FootprintSpec`] is the complete, strongly-typed parameter set for one
//! generated module. It is built by the caller (CLI flags or a JSON request
//! file) and handed to the engine by value.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::footprint::error::FootprintError;
use crate::footprint::units::Units;

/// Package topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Package {
    /// Single row of pins (SIP / single row header).
    SingleInline,
    /// Two rows, numbered down one side and back up the other (DIP).
    DualInline,
    /// Two rows, numbered across the rows (dual row header).
    DualRowConnector,
    /// Pads on all four edges of a leadless body (QFN).
    QuadNoLead,
}

impl Package {
    /// All supported topologies.
    pub const ALL: [Self; 4] = [
        Self::SingleInline,
        Self::DualInline,
        Self::DualRowConnector,
        Self::QuadNoLead,
    ];

    /// Returns the tag written in the module's `PACK[...]` comment.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::SingleInline => "SIP",
            Self::DualInline => "DIP",
            Self::DualRowConnector => "DRC",
            Self::QuadNoLead => "QFN",
        }
    }

    /// Returns `true` if the topology places pins in pairs across two rows.
    #[must_use]
    pub const fn requires_even_pins(&self) -> bool {
        matches!(self, Self::DualInline | Self::DualRowConnector)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Package {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_uppercase();

        match normalised.as_str() {
            "SIP" | "SIL" | "SINGLEINLINE" => Ok(Self::SingleInline),
            "DIP" | "DIL" | "DUALINLINE" => Ok(Self::DualInline),
            "DRC" | "HEADER" | "DUALROWCONNECTOR" => Ok(Self::DualRowConnector),
            "QFN" | "QUADNOLEAD" => Ok(Self::QuadNoLead),
            _ => Err(FootprintError::unsupported_package(s)),
        }
    }
}

impl TryFrom<String> for Package {
    type Error = FootprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Package> for String {
    fn from(package: Package) -> Self {
        package.tag().to_string()
    }
}

/// Copper pad shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Round pad; requires equal X and Y sizes.
    #[default]
    #[serde(alias = "C")]
    Circle,
    /// Rectangular or square pad.
    #[serde(alias = "R", alias = "square")]
    Rectangle,
    /// Oval pad; requires differing X and Y sizes.
    #[serde(alias = "O", alias = "oval")]
    Oblong,
}

impl PadShape {
    /// Returns the legacy shape code.
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Self::Circle => 'C',
            Self::Rectangle => 'R',
            Self::Oblong => 'O',
        }
    }
}

impl FromStr for PadShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "circle" => Ok(Self::Circle),
            "r" | "rect" | "rectangle" | "square" => Ok(Self::Rectangle),
            "o" | "oblong" | "oval" => Ok(Self::Oblong),
            _ => Err(format!(
                "unknown pad shape '{s}' (expected circle, rectangle or oblong)"
            )),
        }
    }
}

bitflags! {
    /// Copper and mask layers a pad is present on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LayerMask: u32 {
        /// Bottom copper.
        const COPPER_BACK = 1 << 0;
        /// Inner copper layers 1 to 14.
        const COPPER_INNER = 0x0000_7FFE;
        /// Top copper.
        const COPPER_FRONT = 1 << 15;
        /// Bottom solder paste.
        const PASTE_BACK = 1 << 18;
        /// Top solder paste.
        const PASTE_FRONT = 1 << 19;
        /// Top silkscreen.
        const SILK_FRONT = 1 << 21;
        /// Bottom solder mask.
        const MASK_BACK = 1 << 22;
        /// Top solder mask.
        const MASK_FRONT = 1 << 23;

        /// Every copper layer.
        const ALL_COPPER = Self::COPPER_BACK.bits()
            | Self::COPPER_INNER.bits()
            | Self::COPPER_FRONT.bits();
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.bits())
    }
}

/// How the part is mounted on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mount {
    /// Plated through-hole; pads are drilled.
    #[default]
    #[serde(alias = "STD", alias = "tht")]
    ThroughHole,
    /// Surface mount; no drill.
    #[serde(alias = "SMD", alias = "smt")]
    SurfaceMount,
}

impl Mount {
    /// Returns the legacy pad attribute code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ThroughHole => "STD",
            Self::SurfaceMount => "SMD",
        }
    }

    /// Returns the layers a pad of this mount type occupies.
    #[must_use]
    pub const fn layer_mask(&self) -> LayerMask {
        match self {
            Self::ThroughHole => LayerMask::ALL_COPPER
                .union(LayerMask::SILK_FRONT)
                .union(LayerMask::MASK_BACK)
                .union(LayerMask::MASK_FRONT),
            Self::SurfaceMount => LayerMask::COPPER_FRONT
                .union(LayerMask::PASTE_FRONT)
                .union(LayerMask::MASK_FRONT),
        }
    }
}

impl FromStr for Mount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "std" | "tht" | "through-hole" | "through_hole" => Ok(Self::ThroughHole),
            "smd" | "smt" | "surface-mount" | "surface_mount" => Ok(Self::SurfaceMount),
            _ => Err(format!(
                "unknown mount type '{s}' (expected through-hole or smd)"
            )),
        }
    }
}

/// Full parameter set for one generated module.
///
/// Linear dimensions are expressed in [`FootprintSpec::units`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FootprintSpec {
    /// Package topology.
    pub package: Package,

    /// Units of every linear dimension below. Defaults to the configured unit.
    #[serde(default)]
    pub units: Option<Units>,

    /// Number of pins.
    pub pin_count: u32,

    /// Centre-to-centre spacing of adjacent pins along a row.
    pub pitch: f64,

    /// Pad size in X.
    pub pad_size_x: f64,

    /// Pad size in Y.
    pub pad_size_y: f64,

    /// Drill diameter. Ignored for surface mount.
    #[serde(default)]
    pub drill_diameter: f64,

    /// Pad shape.
    #[serde(default)]
    pub pad_shape: PadShape,

    /// Mount type.
    #[serde(default)]
    pub mount: Mount,

    /// Render pin 1 as a rectangle whatever the pad shape.
    #[serde(default)]
    pub first_pad_square: bool,

    /// Staggered interlocking pattern (single inline only).
    #[serde(default)]
    pub self_locking: bool,

    /// Distance between the two rows / the left and right edges.
    #[serde(default)]
    pub row_spacing_x: Option<f64>,

    /// Distance between the top and bottom edges (quad only).
    #[serde(default)]
    pub row_spacing_y: Option<f64>,

    /// Pin count on each of the left and right edges (quad only).
    #[serde(default)]
    pub pins_per_horizontal_edge: Option<u32>,

    /// Module (footprint) name; also names the output file.
    pub module_name: String,

    /// Reference designator text, e.g. `J**`.
    #[serde(default = "default_reference")]
    pub reference_designator: String,

    /// Library description. Defaults to the module name.
    #[serde(default)]
    pub description: String,

    /// Library search keywords. Defaults to the module name.
    #[serde(default)]
    pub keywords: String,
}

fn default_reference() -> String {
    "REF**".to_string()
}

impl FootprintSpec {
    /// Creates a spec with the generator's stock defaults (in mils):
    /// 8 pins, 100 mil pitch, 70 mil round pads, 35 mil drill.
    #[must_use]
    pub fn new(module_name: impl Into<String>, package: Package) -> Self {
        Self {
            package,
            units: Some(Units::Mil),
            pin_count: 8,
            pitch: 100.0,
            pad_size_x: 70.0,
            pad_size_y: 70.0,
            drill_diameter: 35.0,
            pad_shape: PadShape::Circle,
            mount: Mount::ThroughHole,
            first_pad_square: false,
            self_locking: false,
            row_spacing_x: None,
            row_spacing_y: None,
            pins_per_horizontal_edge: None,
            module_name: module_name.into(),
            reference_designator: default_reference(),
            description: String::new(),
            keywords: String::new(),
        }
    }

    /// Returns the declared units, falling back to `default`.
    #[must_use]
    pub fn units_or(&self, default: Units) -> Units {
        self.units.unwrap_or(default)
    }
}
