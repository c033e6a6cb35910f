//! File output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use spherepath::Toolpath;
use tracing::info;

use crate::error::{GcodeError, Result};
use crate::gcode::{gcode_lines, GcodeSettings};

/// Write the program for `toolpath` to `path`, creating or truncating it.
pub fn write_gcode(path: &Path, toolpath: &Toolpath, settings: &GcodeSettings) -> Result<()> {
    let file = File::create(path).map_err(|source| GcodeError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    write_program(&mut out, toolpath, settings).map_err(|source| GcodeError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), nodes = toolpath.len(), "wrote gcode");
    Ok(())
}

fn write_program<W: Write>(
    out: &mut W,
    toolpath: &Toolpath,
    settings: &GcodeSettings,
) -> std::io::Result<()> {
    out.write_all(settings.flavor.start_gcode().as_bytes())?;
    for line in gcode_lines(toolpath, settings) {
        writeln!(out, "{line}")?;
    }
    out.write_all(settings.flavor.end_gcode().as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::GcodeFlavor;
    use crate::gcode::generate_gcode;
    use spherepath::{circle_xy, PathSettings};

    fn path() -> Toolpath {
        circle_xy(&PathSettings::default(), 1, 2, 1.0).unwrap()
    }

    #[test]
    fn test_file_matches_generated_text() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.gcode");
        let settings = GcodeSettings {
            flavor: GcodeFlavor::Marlin,
            ..Default::default()
        };

        write_gcode(&target, &path(), &settings).unwrap();
        let written = std::fs::read_to_string(&target).unwrap();
        assert_eq!(written, generate_gcode(&path(), &settings));
    }

    #[test]
    fn test_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.gcode");
        std::fs::write(&target, "x".repeat(4096)).unwrap();

        let empty = Toolpath::new();
        write_gcode(&target, &empty, &GcodeSettings::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "");
    }

    #[test]
    fn test_create_failure_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.gcode");

        let err = write_gcode(&target, &path(), &GcodeSettings::default()).unwrap_err();
        assert!(matches!(err, GcodeError::Create { .. }));
        assert!(err.to_string().contains("out.gcode"));
    }
}
