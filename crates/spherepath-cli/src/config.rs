//! Job files and command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use spherepath::{PathSettings, Pattern};
use spherepath_gcode::GcodeSettings;

/// Everything needed to produce one program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub settings: PathSettings,
    pub pattern: Pattern,
    pub gcode: GcodeSettings,
}

impl JobConfig {
    /// Load a job from a TOML file. Missing tables and keys take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading job file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing job file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatternKind {
    SphereXy,
    SphereXz,
    CircleXy,
}

/// Job selection shared by `generate` and `info`.
#[derive(Debug, Default, Args)]
pub struct JobArgs {
    /// TOML job file with [settings], [pattern] and [gcode] tables
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Toolpath pattern
    #[arg(short, long, value_enum)]
    pub pattern: Option<PatternKind>,

    /// Number of spherical layers (cylinder layers for circle-xy)
    #[arg(long)]
    pub layers: Option<u32>,

    /// Number of cylinder layers (circle-xy)
    #[arg(long)]
    pub layers_height: Option<u32>,

    /// Circles per cylinder (circle-xy)
    #[arg(long)]
    pub layers_width: Option<u32>,

    /// Seam rotation per ring in degrees
    #[arg(long)]
    pub c_offset: Option<f64>,

    /// Distance between nodes (mm)
    #[arg(long)]
    pub resolution: Option<f64>,

    /// Distance between rings (mm)
    #[arg(long)]
    pub layer_distance: Option<f64>,

    /// Layer thickness (mm)
    #[arg(long)]
    pub layer_height: Option<f64>,

    /// Sphere or cylinder radius (mm)
    #[arg(long)]
    pub radius: Option<f64>,

    /// Height at which printing starts (mm)
    #[arg(long, allow_hyphen_values = true)]
    pub platform_height: Option<f64>,
}

impl JobArgs {
    /// Load the job file (or defaults) and apply flag overrides.
    pub fn resolve(&self) -> Result<JobConfig> {
        let mut job = match &self.config {
            Some(path) => JobConfig::load(path)?,
            None => JobConfig::default(),
        };
        self.apply(&mut job);
        Ok(job)
    }

    fn apply(&self, job: &mut JobConfig) {
        let settings = &mut job.settings;
        override_with(&mut settings.resolution, self.resolution);
        override_with(&mut settings.layer_distance, self.layer_distance);
        override_with(&mut settings.layer_height, self.layer_height);
        override_with(&mut settings.radius, self.radius);
        override_with(&mut settings.platform_height, self.platform_height);

        if let Some(kind) = self.pattern {
            job.pattern = switch_kind(job.pattern, kind);
        }
        match &mut job.pattern {
            Pattern::SphereXy { layers, c_offset } => {
                override_with(layers, self.layers);
                override_with(c_offset, self.c_offset);
            }
            Pattern::SphereXz { layers } => override_with(layers, self.layers),
            Pattern::CircleXy {
                layers_height,
                layers_width,
                c_offset,
            } => {
                override_with(layers_height, self.layers_height.or(self.layers));
                override_with(layers_width, self.layers_width);
                override_with(c_offset, self.c_offset);
            }
        }
    }
}

fn override_with<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Change the pattern type, carrying over the layer count and seam offset.
fn switch_kind(current: Pattern, kind: PatternKind) -> Pattern {
    let (layers, c_offset) = match current {
        Pattern::SphereXy { layers, c_offset } => (layers, c_offset),
        Pattern::SphereXz { layers } => (layers, 1.0),
        Pattern::CircleXy {
            layers_height,
            c_offset,
            ..
        } => (layers_height, c_offset),
    };
    match (kind, current) {
        (PatternKind::SphereXy, _) => Pattern::SphereXy { layers, c_offset },
        (PatternKind::SphereXz, _) => Pattern::SphereXz { layers },
        (PatternKind::CircleXy, Pattern::CircleXy { .. }) => current,
        (PatternKind::CircleXy, _) => Pattern::CircleXy {
            layers_height: layers,
            layers_width: layers,
            c_offset,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spherepath_gcode::{GcodeFlavor, OrientationFormat};

    #[test]
    fn test_empty_file_is_reference_job() {
        let job = JobConfig::from_toml("").unwrap();
        assert_eq!(job, JobConfig::default());
        assert_eq!(job.settings.radius, 10.0);
        assert_eq!(
            job.pattern,
            Pattern::SphereXy {
                layers: 20,
                c_offset: 1.0
            }
        );
    }

    #[test]
    fn test_full_job_file() {
        let job = JobConfig::from_toml(
            r#"
            [settings]
            radius = 25.0
            platform_height = 3.5

            [pattern]
            type = "sphere_xz"
            layers = 4

            [gcode]
            flavor = "marlin"
            orientation = "rotary"
            "#,
        )
        .unwrap();
        assert_eq!(job.settings.radius, 25.0);
        assert_eq!(job.settings.resolution, 0.1);
        assert_eq!(job.pattern, Pattern::SphereXz { layers: 4 });
        assert_eq!(job.gcode.flavor, GcodeFlavor::Marlin);
        assert_eq!(job.gcode.orientation, OrientationFormat::Rotary);
    }

    #[test]
    fn test_unknown_pattern_type_rejected() {
        assert!(JobConfig::from_toml("[pattern]\ntype = \"cone\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.toml");
        std::fs::write(&path, "[settings]\nlayer_height = 0.3\n").unwrap();
        let job = JobConfig::load(&path).unwrap();
        assert_eq!(job.settings.layer_height, 0.3);

        let err = JobConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.toml");
        std::fs::write(
            &path,
            "[settings]\nradius = 5.0\n[pattern]\ntype = \"sphere_xy\"\nlayers = 3\nc_offset = 2.0\n",
        )
        .unwrap();

        let args = JobArgs {
            config: Some(path),
            layers: Some(7),
            radius: Some(8.0),
            ..Default::default()
        };
        let job = args.resolve().unwrap();
        assert_eq!(job.settings.radius, 8.0);
        assert_eq!(
            job.pattern,
            Pattern::SphereXy {
                layers: 7,
                c_offset: 2.0
            }
        );
    }

    #[test]
    fn test_switch_pattern_kind() {
        let args = JobArgs {
            pattern: Some(PatternKind::CircleXy),
            layers_width: Some(12),
            ..Default::default()
        };
        let job = args.resolve().unwrap();
        assert_eq!(
            job.pattern,
            Pattern::CircleXy {
                layers_height: 20,
                layers_width: 12,
                c_offset: 1.0
            }
        );

        let args = JobArgs {
            pattern: Some(PatternKind::SphereXz),
            layers: Some(2),
            ..Default::default()
        };
        assert_eq!(args.resolve().unwrap().pattern, Pattern::SphereXz { layers: 2 });
    }
}
