//! Writer for legacy PCBnew module library text.
//!
//! # Record Format
//!
//! ```text
//! PCBNEW-LibModule-V1  <stamp>
//! $INDEX ... $EndINDEX         // Module name index
//! $MODULE <name>               // Header: position, library, description,
//! ...                          //   keywords, reference and value text
//! DS / DC / DA ...             // Outline primitives
//! $PAD ... $EndPAD             // One block per pad, in pin order
//! $EndMODULE  <name>
//! $EndLIBRARY
//! ```
//!
//! All numbers are integers in 1/10 mil. The output contains no
//! time-dependent data: the stamp and timestamp id are fixed.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::footprint::document::ModuleDocument;
use crate::footprint::error::{FootprintError, FootprintResult};
use crate::footprint::packages::{OutlineSegment, PadRecord};

/// Library header line with its fixed date stamp.
pub const LIBRARY_HEADER: &str = "PCBNEW-LibModule-V1  07-02-2012 08:54:12";

/// Fixed module timestamp id.
pub const MODULE_TIMESTAMP: &str = "4F309929";

/// Silkscreen line width.
const OUTLINE_WIDTH: i64 = 120;

/// Front silkscreen layer number.
const SILK_LAYER: u8 = 21;

/// Renders a module document as library text.
#[must_use]
pub fn render(doc: &ModuleDocument) -> String {
    let mut out = String::new();
    let name = doc.name();

    let _ = writeln!(out, "{LIBRARY_HEADER}");
    let _ = writeln!(out, "# encoding utf-8");
    let _ = writeln!(out, "$INDEX");
    let _ = writeln!(out, "{name}");
    let _ = writeln!(out, "$EndINDEX");
    let _ = writeln!(out, "#");
    let _ = writeln!(out, "# {name} PACK[{}]", doc.package().tag());
    let _ = writeln!(out, "#");
    let _ = writeln!(out, "$MODULE {name}");
    let _ = writeln!(out, "Po 0 0 0 15 {MODULE_TIMESTAMP} 00000000 ~~");
    let _ = writeln!(out, "Li {name}");
    let _ = writeln!(out, "Cd {}", doc.description());
    let _ = writeln!(out, "Kw {}", doc.keywords());
    let _ = writeln!(out, "Sc 00000000");
    let _ = writeln!(out, "AR {name}");
    let _ = writeln!(out, "Op 0 0 0");
    let _ = writeln!(
        out,
        "T0 0 {} 600 600 0 120 N V {SILK_LAYER} \"{}\"",
        doc.ref_text_y(),
        doc.reference()
    );
    let _ = writeln!(out, "T1 0 -500 50 50 0 10 N I {SILK_LAYER} \"VAL**\"");

    for segment in doc.outline() {
        write_segment(&mut out, segment);
    }
    for pad in doc.pads() {
        write_pad(&mut out, pad);
    }

    let _ = writeln!(out, "$EndMODULE  {name}");
    let _ = writeln!(out, "$EndLIBRARY");
    let _ = writeln!(out, "#");
    let _ = writeln!(out, "# End Module");

    out
}

/// Writes one outline primitive line.
fn write_segment(out: &mut String, segment: &OutlineSegment) {
    match *segment {
        OutlineSegment::Line { x1, y1, x2, y2 } => {
            let _ = writeln!(out, "DS {x1} {y1} {x2} {y2} {OUTLINE_WIDTH} {SILK_LAYER}");
        }
        OutlineSegment::Circle { x, y, radius } => {
            let _ = writeln!(
                out,
                "DC {x} {y} {} {y} {OUTLINE_WIDTH} {SILK_LAYER}",
                x.saturating_add(radius)
            );
        }
        OutlineSegment::Arc { x, y, extent, .. } => {
            let (sx, sy) = segment.start_point();
            let _ = writeln!(
                out,
                "DA {x} {y} {sx} {sy} {extent} {OUTLINE_WIDTH} {SILK_LAYER}"
            );
        }
    }
}

/// Writes one `$PAD` block.
fn write_pad(out: &mut String, pad: &PadRecord) {
    let _ = writeln!(out, "$PAD");
    let _ = writeln!(
        out,
        "Sh \"{}\" {} {} {} 0 0 0",
        pad.number,
        pad.shape.code(),
        pad.size_x,
        pad.size_y
    );
    let _ = writeln!(out, "Dr {} 0 0", pad.drill);
    let _ = writeln!(out, "At {} N {}", pad.mount.code(), pad.layer_mask);
    let _ = writeln!(out, "Ne 0 \"\"");
    let _ = writeln!(out, "Po {} {}", pad.x, pad.y);
    let _ = writeln!(out, "$EndPAD");
}

/// Renders `doc` and writes it to `dir`, returning the file path.
///
/// The document is fully rendered before the file is created.
///
/// # Errors
///
/// Returns [`FootprintError::FileWrite`] if the directory or file cannot be written.
pub fn write_module(doc: &ModuleDocument, dir: &Path) -> FootprintResult<PathBuf> {
    let text = render(doc);
    let path = dir.join(doc.file_name());

    debug!(path = %path.display(), bytes = text.len(), "Writing module");

    fs::create_dir_all(dir).map_err(|e| FootprintError::file_write(dir, e))?;
    fs::write(&path, text).map_err(|e| FootprintError::file_write(&path, e))?;

    info!(module = doc.name(), path = %path.display(), "Module written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::packages::test_support::validated;
    use crate::footprint::packages::engine_for;
    use crate::footprint::spec::{FootprintSpec, Mount, Package};

    fn document(spec: FootprintSpec) -> ModuleDocument {
        let spec = validated(spec);
        let layout = engine_for(spec.package()).layout(&spec);
        ModuleDocument::new(&spec, layout)
    }

    #[test]
    fn header_and_trailer() {
        let mut spec = FootprintSpec::new("SIP2", Package::SingleInline);
        spec.pin_count = 2;
        let text = render(&document(spec));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], LIBRARY_HEADER);
        assert_eq!(lines[3], "SIP2");
        assert_eq!(lines[6], "# SIP2 PACK[SIP]");
        assert_eq!(lines[8], "$MODULE SIP2");
        assert_eq!(lines[9], "Po 0 0 0 15 4F309929 00000000 ~~");
        assert_eq!(lines[16], "T0 0 -1000 600 600 0 120 N V 21 \"REF**\"");
        assert_eq!(lines[17], "T1 0 -500 50 50 0 10 N I 21 \"VAL**\"");
        assert_eq!(lines[18], "DS -600 -600 1600 -600 120 21");
        assert_eq!(
            &lines[lines.len() - 4..],
            &["$EndMODULE  SIP2", "$EndLIBRARY", "#", "# End Module"]
        );
        assert!(text.ends_with("# End Module\n"));
    }

    #[test]
    fn pad_block_layout() {
        let mut spec = FootprintSpec::new("SIP2", Package::SingleInline);
        spec.pin_count = 2;
        let text = render(&document(spec));

        let expected = "$PAD\n\
                        Sh \"2\" C 700 700 0 0 0\n\
                        Dr 350 0 0\n\
                        At STD N 00E0FFFF\n\
                        Ne 0 \"\"\n\
                        Po 1000 0\n\
                        $EndPAD\n\
                        $EndMODULE  SIP2\n";
        assert!(text.contains(expected), "{text}");
    }

    #[test]
    fn surface_mount_pad_codes() {
        let mut spec = FootprintSpec::new("SMD2", Package::SingleInline);
        spec.pin_count = 2;
        spec.mount = Mount::SurfaceMount;
        let text = render(&document(spec));

        assert!(text.contains("Dr 0 0 0\nAt SMD N 00888000\n"));
    }

    #[test]
    fn notch_and_dot_records() {
        let mut spec = FootprintSpec::new("DIP8", Package::DualInline);
        spec.row_spacing_x = Some(300.0);
        let text = render(&document(spec));

        assert!(text.contains("DA 1500 -600 1750 -600 1800 120 21\n"));
        assert!(text.contains("DC -850 0 -750 0 120 21\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let spec = FootprintSpec::new("SIP8", Package::SingleInline);
        assert_eq!(
            render(&document(spec.clone())),
            render(&document(spec))
        );
    }
}
