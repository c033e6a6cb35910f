#![warn(missing_docs)]

//! G-code output for spherepath toolpaths.
//!
//! Renders motion nodes as `G1` lines, either with the tool vector as
//! `I/J/K` words or converted to A/C rotary axes, optionally wrapped in a
//! controller flavor's start and end blocks. Also post-processes existing
//! programs: uniform rescaling and linearization of circular arcs.
//!
//! # Example
//!
//! ```
//! use spherepath::{sphere_xy, PathSettings};
//! use spherepath_gcode::{generate_gcode, GcodeSettings};
//!
//! let path = sphere_xy(&PathSettings::default(), 1, 1.0).unwrap();
//! let gcode = generate_gcode(&path, &GcodeSettings::default());
//!
//! assert!(gcode.lines().all(|line| line.starts_with("G1 X")));
//! ```

pub mod arc;
pub mod error;
pub mod flavor;
pub mod gcode;
pub mod scale;
pub mod writer;

pub use arc::{linearize_arc, linearize_arc_about, ArcDirection};
pub use error::{GcodeError, Result};
pub use flavor::GcodeFlavor;
pub use gcode::{
    format_coord, format_node, format_node_rotary, gcode_lines, generate_gcode, GcodeSettings,
    OrientationFormat,
};
pub use scale::rescale_gcode;
pub use writer::write_gcode;
