//! G-code flavor definitions.

use serde::{Deserialize, Serialize};

/// G-code flavor (dialect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GcodeFlavor {
    /// Motion lines only.
    #[default]
    Bare,
    /// Marlin firmware with relative extrusion.
    Marlin,
    /// LinuxCNC.
    LinuxCnc,
}

impl GcodeFlavor {
    /// Get the start G-code for this flavor.
    pub fn start_gcode(&self) -> &'static str {
        match self {
            GcodeFlavor::Bare => "",
            GcodeFlavor::Marlin => {
                "G21 ; Millimeters\n\
                 G90 ; Absolute positioning\n\
                 M83 ; Relative extrusion\n\
                 G92 E0 ; Reset extruder\n"
            }
            GcodeFlavor::LinuxCnc => {
                "G21 ; Millimeters\n\
                 G90 ; Absolute positioning\n\
                 G17 ; XY plane\n"
            }
        }
    }

    /// Get the end G-code for this flavor.
    pub fn end_gcode(&self) -> &'static str {
        match self {
            GcodeFlavor::Bare => "",
            GcodeFlavor::Marlin => {
                "M400 ; Wait for moves to finish\n\
                 M84 ; Disable motors\n"
            }
            GcodeFlavor::LinuxCnc => "M2 ; Program end\n",
        }
    }

    /// Flavor name as used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            GcodeFlavor::Bare => "bare",
            GcodeFlavor::Marlin => "marlin",
            GcodeFlavor::LinuxCnc => "linux_cnc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_has_no_blocks() {
        assert!(GcodeFlavor::Bare.start_gcode().is_empty());
        assert!(GcodeFlavor::Bare.end_gcode().is_empty());
    }

    #[test]
    fn test_blocks_are_whole_lines() {
        for flavor in [GcodeFlavor::Marlin, GcodeFlavor::LinuxCnc] {
            assert!(flavor.start_gcode().starts_with("G21"));
            assert!(flavor.start_gcode().ends_with('\n'));
            assert!(flavor.end_gcode().ends_with('\n'));
        }
        assert!(GcodeFlavor::Marlin.start_gcode().contains("M83"));
        assert!(GcodeFlavor::LinuxCnc.end_gcode().starts_with("M2"));
    }
}
