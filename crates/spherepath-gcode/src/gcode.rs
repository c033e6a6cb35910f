//! Motion command formatting.

use serde::{Deserialize, Serialize};
use spherepath::{MotionNode, Toolpath};
use spherepath_math::RotaryAxes;
use tracing::debug;

use crate::flavor::GcodeFlavor;

/// How the tool orientation is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationFormat {
    /// Tool vector as `I J K` words.
    #[default]
    Vector,
    /// Machine `A C` angles, with the position rotated into the machine frame.
    Rotary,
}

/// G-code output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeSettings {
    /// Start/end block dialect.
    pub flavor: GcodeFlavor,
    /// Orientation words.
    pub orientation: OrientationFormat,
}

/// Format a floating point value with a fixed number of decimals.
pub fn format_coord(value: f64, precision: usize) -> String {
    format!("{:.prec$}", value, prec = precision)
}

fn push_word(line: &mut String, letter: char, value: Option<f64>, precision: usize) {
    if let Some(v) = value {
        line.push(' ');
        line.push(letter);
        line.push_str(&format_coord(v, precision));
    }
}

fn push_feed_and_extrusion(line: &mut String, node: &MotionNode) {
    push_word(line, 'F', node.feed_rate, 5);
    push_word(line, 'E', node.extrusion, 5);
}

/// Render `G1 X Y Z [I J K] [F] [E]`.
///
/// Positions use 3 decimals, everything else 5.
pub fn format_node(node: &MotionNode) -> String {
    let mut line = String::from("G1");
    let p = node.position;
    push_word(&mut line, 'X', Some(p.x), 3);
    push_word(&mut line, 'Y', Some(p.y), 3);
    push_word(&mut line, 'Z', Some(p.z), 3);
    let o = node.orientation;
    push_word(&mut line, 'I', o.map(|v| v.x), 5);
    push_word(&mut line, 'J', o.map(|v| v.y), 5);
    push_word(&mut line, 'K', o.map(|v| v.z), 5);
    push_feed_and_extrusion(&mut line, node);
    line
}

/// Render `G1 X Y Z A C [F] [E]` in the machine frame.
///
/// Nodes without a usable orientation keep their part-space position and
/// get no rotary words.
pub fn format_node_rotary(node: &MotionNode) -> String {
    let axes = node
        .orientation
        .as_ref()
        .and_then(RotaryAxes::from_orientation);
    let p = match &axes {
        Some(axes) => axes.to_machine(&node.position),
        None => node.position,
    };

    let mut line = String::from("G1");
    push_word(&mut line, 'X', Some(p.x), 3);
    push_word(&mut line, 'Y', Some(p.y), 3);
    push_word(&mut line, 'Z', Some(p.z), 3);
    push_word(&mut line, 'A', axes.map(|a| a.a_deg), 5);
    push_word(&mut line, 'C', axes.map(|a| a.c_deg), 5);
    push_feed_and_extrusion(&mut line, node);
    line
}

/// One motion line per node, in path order.
pub fn gcode_lines<'a>(
    toolpath: &'a Toolpath,
    settings: &GcodeSettings,
) -> impl Iterator<Item = String> + 'a {
    let format: fn(&MotionNode) -> String = match settings.orientation {
        OrientationFormat::Vector => format_node,
        OrientationFormat::Rotary => format_node_rotary,
    };
    toolpath.iter().map(format)
}

/// Generate the complete program text.
pub fn generate_gcode(toolpath: &Toolpath, settings: &GcodeSettings) -> String {
    let mut output = String::new();
    output.push_str(settings.flavor.start_gcode());
    for line in gcode_lines(toolpath, settings) {
        output.push_str(&line);
        output.push('\n');
    }
    output.push_str(settings.flavor.end_gcode());

    debug!(
        flavor = settings.flavor.name(),
        nodes = toolpath.len(),
        bytes = output.len(),
        "rendered gcode"
    );
    output
}
