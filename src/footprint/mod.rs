//! Footprint layout engine.
//!
//! Turns a [`FootprintSpec`] into a PCBnew legacy module:
//!
//! 1. [`validate`] checks the parameters and normalises lengths to mils
//! 2. [`packages`] places pads and draws the outline for the package topology
//! 3. [`serializer`] renders the [`ModuleDocument`] and writes the `.emp` file
//!
//! # Supported Package Types
//!
//! - [`packages::single_inline`] - Single row headers, optionally self-locking
//! - [`packages::dual_inline`] - DIP, numbered down and back up
//! - [`packages::dual_row`] - Dual row headers, numbered across the rows
//! - [`packages::quad_no_lead`] - QFN, pads on all four edges
//!
//! # Example
//!
//! ```
//! use kicad_modgen::footprint::{generate, serializer, FootprintSpec, Package, Units};
//!
//! let mut spec = FootprintSpec::new("DIP8", Package::DualInline);
//! spec.row_spacing_x = Some(300.0);
//!
//! let doc = generate(spec, Units::Mil).unwrap();
//! assert_eq!(doc.pads().len(), 8);
//! assert!(serializer::render(&doc).starts_with("PCBNEW-LibModule-V1"));
//! ```

pub mod document;
pub mod error;
pub mod packages;
pub mod serializer;
pub mod spec;
pub mod units;
pub mod validate;

pub use document::ModuleDocument;
pub use error::{FootprintError, FootprintResult};
pub use packages::{engine_for, Layout, OutlineSegment, PackageLayout, PadRecord};
pub use spec::{FootprintSpec, LayerMask, Mount, Package, PadShape};
pub use units::Units;
pub use validate::{validate, Parameter, ValidatedSpec};

use std::path::Path;

use tracing::debug;

/// Validates `spec` and lays it out as a module document.
///
/// `default_units` applies when the spec does not declare its units.
///
/// # Errors
///
/// Returns [`FootprintError::InvalidParameter`] for the first violated rule.
pub fn generate(spec: FootprintSpec, default_units: Units) -> FootprintResult<ModuleDocument> {
    let spec = validate(spec, default_units)?;
    let layout = engine_for(spec.package()).layout(&spec);

    debug!(
        module = %spec.spec().module_name,
        package = %spec.package(),
        pads = layout.pads.len(),
        segments = layout.outline.len(),
        "Layout complete"
    );

    Ok(ModuleDocument::new(&spec, layout))
}

/// Loads a generation request from a JSON file.
///
/// # Errors
///
/// Returns [`FootprintError::UnsupportedPackage`] if the `package` tag is not
/// recognised, or a read/parse error if the file is not a valid request.
pub fn load_request(path: &Path) -> FootprintResult<FootprintSpec> {
    let parse_error = |e| FootprintError::RequestParse {
        path: path.to_path_buf(),
        source: e,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| FootprintError::RequestRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let request: serde_json::Value = serde_json::from_str(&contents).map_err(parse_error)?;

    if let Some(tag) = request.get("package").and_then(serde_json::Value::as_str) {
        tag.parse::<Package>()?;
    }

    serde_json::from_value(request).map_err(parse_error)
}
