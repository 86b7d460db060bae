//! kicad-modgen: footprint (module) generator for KiCad PCBnew legacy libraries
//!
//! Given a handful of geometric parameters (pin count, pitch, pad size,
//! drill, package topology) this library lays out the pads and silkscreen
//! outline of a footprint and renders it in the `PCBNEW-LibModule-V1` text
//! format.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Configuration error types
//! - [`footprint`] — Validation, package layout and module serialisation

pub mod config;
pub mod error;
pub mod footprint;
