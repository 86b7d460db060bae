//! The generated module: header metadata plus laid-out pads and outline.

use crate::footprint::packages::{Layout, OutlineSegment, PadRecord};
use crate::footprint::spec::Package;
use crate::footprint::validate::ValidatedSpec;

/// File extension of generated module files.
pub const MODULE_EXTENSION: &str = "emp";

/// Suffix appended to self-locking single inline module file names.
pub const LOCK_SUFFIX: &str = "_LOCK";

/// A complete module ready to be serialised.
///
/// Built once per generation request; its contents cannot be changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDocument {
    name: String,
    package: Package,
    description: String,
    keywords: String,
    reference: String,
    ref_text_y: i64,
    outline: Vec<OutlineSegment>,
    pads: Vec<PadRecord>,
    file_stem: String,
}

impl ModuleDocument {
    /// Assembles a document from a validated spec and its layout.
    #[must_use]
    pub fn new(spec: &ValidatedSpec, layout: Layout) -> Self {
        let params = spec.spec();
        let locked = params.package == Package::SingleInline && params.self_locking;
        let file_stem = if locked {
            format!("{}{LOCK_SUFFIX}", params.module_name)
        } else {
            params.module_name.clone()
        };

        Self {
            name: params.module_name.clone(),
            package: params.package,
            description: params.description.clone(),
            keywords: params.keywords.clone(),
            reference: params.reference_designator.clone(),
            ref_text_y: layout.ref_text_y,
            outline: layout.outline,
            pads: layout.pads,
            file_stem,
        }
    }

    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the package topology.
    #[must_use]
    pub const fn package(&self) -> Package {
        self.package
    }

    /// Returns the library description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the library keywords.
    #[must_use]
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    /// Returns the reference designator text.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the Y anchor of the reference text.
    #[must_use]
    pub const fn ref_text_y(&self) -> i64 {
        self.ref_text_y
    }

    /// Returns the outline primitives in drawing order.
    #[must_use]
    pub fn outline(&self) -> &[OutlineSegment] {
        &self.outline
    }

    /// Returns the pads in pin order.
    #[must_use]
    pub fn pads(&self) -> &[PadRecord] {
        &self.pads
    }

    /// Returns the output file name, e.g. `CONN8_LOCK.emp`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{MODULE_EXTENSION}", self.file_stem)
    }
}
