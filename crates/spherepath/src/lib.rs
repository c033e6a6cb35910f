#![warn(missing_docs)]

//! 5-axis toolpath generation over spheres and cylinders.
//!
//! This crate decomposes spherical shells into latitude rings or meridian
//! arcs, and cylinders into stacked circles, then discretizes each one into
//! motion nodes carrying a position, a radial tool orientation and an
//! extrusion amount.
//!
//! # Example
//!
//! ```
//! use spherepath::{generate, PathSettings, Pattern};
//!
//! let settings = PathSettings::default();
//! let pattern = Pattern::SphereXy { layers: 2, c_offset: 1.0 };
//! let path = generate(&settings, &pattern).unwrap();
//!
//! assert!(path.start().unwrap().is_rapid());
//! println!("Nodes: {}", path.len());
//! ```

pub mod assemble;
pub mod discretize;
pub mod error;
pub mod node;

pub use assemble::{
    circle_xy, discretize_plan, generate, plan, sphere_xy, sphere_xz, Pattern, RingKind, RingPlan,
    SeamOffset,
};
pub use discretize::{xy_circle, xz_half_circle, CircleRing, HalfCircleArc, SweepDirection};
pub use error::{PathError, Result};
pub use node::{MotionNode, PathStats, Toolpath};

use serde::{Deserialize, Serialize};

/// Deposited cross-section per unit of travel for the reference nozzle and
/// material (mm²).
pub const PLASTIC_CROSS_SECTION: f64 = 0.2078760;

/// Geometry and process parameters shared by every pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Distance between consecutive nodes along a ring or arc (mm).
    pub resolution: f64,
    /// Distance between neighbouring rings/arcs within a layer (mm).
    pub layer_distance: f64,
    /// Thickness of one deposited layer (mm).
    pub layer_height: f64,
    /// Radius of the sphere or cylinder printed on (mm).
    pub radius: f64,
    /// Height at which the 5-axis print begins (mm).
    pub platform_height: f64,
    /// Extrusion per mm of travel per mm of layer height.
    pub plastic_cross_section: f64,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            resolution: 0.1,
            layer_distance: 0.2,
            layer_height: 0.2,
            radius: 10.0,
            platform_height: 0.0,
            plastic_cross_section: PLASTIC_CROSS_SECTION,
        }
    }
}

impl PathSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("resolution", self.resolution),
            ("layer_distance", self.layer_distance),
            ("layer_height", self.layer_height),
            ("radius", self.radius),
            ("plastic_cross_section", self.plastic_cross_section),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PathError::InvalidSettings(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !self.platform_height.is_finite() {
            return Err(PathError::InvalidSettings(
                "platform_height must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Extrusion amount for one resolution step.
    pub fn extrusion_per_step(&self) -> f64 {
        self.resolution * self.layer_height * self.plastic_cross_section
    }
}
