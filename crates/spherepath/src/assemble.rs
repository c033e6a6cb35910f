//! Path assembly: layered raster sweeps over spheres and cylinders.
//!
//! Every pattern walks its layers outward, alternating the sweep direction
//! from one layer to the next so that each layer starts where the previous
//! one ended. A pattern first produces a [`RingPlan`] per ring/arc; the plans
//! are then discretized in order into one [`Toolpath`].

use serde::{Deserialize, Serialize};
use spherepath_math::{arc_length_step_deg, spherical_cap};
use tracing::{debug, info, trace};

use crate::discretize::{xy_circle, xz_half_circle, CircleRing, HalfCircleArc, SweepDirection};
use crate::error::{PathError, Result};
use crate::node::Toolpath;
use crate::PathSettings;

/// Toolpath pattern and its layer counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    /// Latitude rings stacked from pole to equator on growing spheres.
    SphereXy {
        /// Number of spherical layers.
        layers: u32,
        /// Seam rotation added after every ring (degrees).
        c_offset: f64,
    },
    /// Meridian half circles swept across growing spheres.
    SphereXz {
        /// Number of spherical layers.
        layers: u32,
    },
    /// Stacked circles on growing concentric cylinders.
    CircleXy {
        /// Number of radial (cylinder) layers.
        layers_height: u32,
        /// Number of circles per cylinder, stepping down from the platform.
        layers_width: u32,
        /// Seam rotation added after every ring (degrees).
        c_offset: f64,
    },
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::SphereXy {
            layers: 20,
            c_offset: 1.0,
        }
    }
}

impl Pattern {
    /// Short name used in logs and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::SphereXy { .. } => "sphere-xy",
            Pattern::SphereXz { .. } => "sphere-xz",
            Pattern::CircleXy { .. } => "circle-xy",
        }
    }

    /// Validate layer counts and seam offset.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Pattern::SphereXy { layers, c_offset } => {
                check_count("layers", layers)?;
                check_seam(c_offset)
            }
            Pattern::SphereXz { layers } => check_count("layers", layers),
            Pattern::CircleXy {
                layers_height,
                layers_width,
                c_offset,
            } => {
                check_count("layers_height", layers_height)?;
                check_count("layers_width", layers_width)?;
                check_seam(c_offset)
            }
        }
    }
}

fn check_count(name: &str, count: u32) -> Result<()> {
    if count == 0 {
        return Err(PathError::InvalidSettings(format!(
            "{name} must be at least 1"
        )));
    }
    Ok(())
}

fn check_seam(c_offset: f64) -> Result<()> {
    if !(0.0..360.0).contains(&c_offset) {
        return Err(PathError::InvalidSettings(format!(
            "c_offset must be in [0, 360), got {c_offset}"
        )));
    }
    Ok(())
}

/// Rotating start angle that keeps ring seams from lining up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamOffset {
    angle: f64,
    step: f64,
}

impl SeamOffset {
    /// Start at 0 degrees, advancing by `step` per ring.
    pub fn new(step: f64) -> Self {
        Self { angle: 0.0, step }
    }

    /// Current start angle (degrees).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Move to the next ring's start angle, wrapping once past 360.
    pub fn advance(&mut self) {
        self.angle += self.step;
        if self.angle > 360.0 {
            self.angle -= 360.0;
        }
    }
}

/// What a planned ring is discretized as.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RingKind {
    /// Full circle parallel to XY.
    Circle(CircleRing),
    /// Half circle parallel to XZ.
    HalfCircle(HalfCircleArc),
}

/// One ring or arc scheduled by a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingPlan {
    /// Layer index, starting at 1.
    pub layer: u32,
    /// Sweep position: polar angle (sphere-xy), meridian angle (sphere-xz)
    /// or height (circle-xy).
    pub sweep: f64,
    /// Direction of the layer's sweep.
    pub direction: SweepDirection,
    /// Geometry to discretize.
    pub kind: RingKind,
}

/// Walk `layers` layers, alternating direction, collecting the
/// `(sweep, ring)` pairs each layer emits.
fn raster_sweep<F>(layers: u32, mut layer_rings: F) -> Vec<RingPlan>
where
    F: FnMut(u32, SweepDirection, &mut Vec<(f64, RingKind)>),
{
    let mut plans = Vec::new();
    let mut direction = SweepDirection::Ascending;
    let mut rings = Vec::new();
    for layer in 1..=layers {
        layer_rings(layer, direction, &mut rings);
        plans.extend(rings.drain(..).map(|(sweep, kind)| RingPlan {
            layer,
            sweep,
            direction,
            kind,
        }));
        direction = direction.flip();
    }
    plans
}

fn sphere_radius(settings: &PathSettings, layer: u32) -> f64 {
    settings.radius + settings.layer_height * f64::from(layer)
}

fn plan_sphere_xy(settings: &PathSettings, layers: u32, c_offset: f64) -> Vec<RingPlan> {
    let mut polar = 0.0_f64;
    let mut seam = SeamOffset::new(c_offset);

    raster_sweep(layers, |layer, direction, rings| {
        let radius = sphere_radius(settings, layer);
        let step = arc_length_step_deg(settings.layer_distance, radius);
        debug!(layer, radius, step, "sphere-xy layer");

        if polar == 0.0 {
            polar += step;
        }
        let in_sweep = |polar: f64| {
            if direction.is_ascending() {
                polar <= 90.0
            } else {
                polar >= 0.0
            }
        };
        while in_sweep(polar) {
            let cap = spherical_cap(polar, radius);
            let ring = CircleRing {
                radius: cap.latitude_radius,
                z: cap.axial_offset,
                vertical_offset: settings.platform_height,
                start_angle: seam.angle(),
            };
            rings.push((polar, RingKind::Circle(ring)));
            seam.advance();
            polar = direction.advance(polar, step);
        }
        // Back inside [0, 90] for the reverse sweep of the next layer.
        polar = direction.flip().advance(polar, step);
    })
}

fn plan_sphere_xz(settings: &PathSettings, layers: u32) -> Vec<RingPlan> {
    // Shared across layers: the next layer resumes where this one stopped.
    let mut counter: i64 = 1;
    let mut arc_direction = SweepDirection::Ascending;

    raster_sweep(layers, |layer, direction, rings| {
        let radius = sphere_radius(settings, layer);
        let step = arc_length_step_deg(settings.layer_distance, radius);
        debug!(layer, radius, step, "sphere-xz layer");

        let in_range = |counter: i64| {
            let angle = step * counter as f64;
            if direction.is_ascending() {
                angle < 180.0
            } else {
                angle > 0.0
            }
        };
        while in_range(counter) {
            let angle = step * counter as f64;
            let cap = spherical_cap(angle, radius);
            let arc = HalfCircleArc {
                radius: cap.latitude_radius,
                y: cap.axial_offset,
                vertical_offset: settings.platform_height,
                direction: arc_direction,
            };
            rings.push((angle, RingKind::HalfCircle(arc)));
            arc_direction = arc_direction.flip();
            counter += if direction.is_ascending() { 1 } else { -1 };
        }
    })
}

fn plan_circle_xy(
    settings: &PathSettings,
    layers_height: u32,
    layers_width: u32,
    c_offset: f64,
) -> Vec<RingPlan> {
    let mut seam = SeamOffset::new(c_offset);

    raster_sweep(layers_height, |layer, direction, rings| {
        let radius = sphere_radius(settings, layer);
        debug!(layer, radius, "circle-xy layer");

        for k in 0..layers_width {
            let index = if direction.is_ascending() {
                k
            } else {
                layers_width - 1 - k
            };
            let height = settings.platform_height - settings.layer_distance * f64::from(index);
            let ring = CircleRing {
                radius,
                z: 0.0,
                vertical_offset: height,
                start_angle: seam.angle(),
            };
            rings.push((height, RingKind::Circle(ring)));
            seam.advance();
        }
    })
}

/// Schedule the rings/arcs of `pattern` without discretizing them.
pub fn plan(settings: &PathSettings, pattern: &Pattern) -> Result<Vec<RingPlan>> {
    settings.validate()?;
    pattern.validate()?;

    let plans = match *pattern {
        Pattern::SphereXy { layers, c_offset } => plan_sphere_xy(settings, layers, c_offset),
        Pattern::SphereXz { layers } => plan_sphere_xz(settings, layers),
        Pattern::CircleXy {
            layers_height,
            layers_width,
            c_offset,
        } => plan_circle_xy(settings, layers_height, layers_width, c_offset),
    };
    debug!(pattern = pattern.name(), rings = plans.len(), "planned");
    Ok(plans)
}

/// Discretize planned rings in order and concatenate them.
pub fn discretize_plan(settings: &PathSettings, plans: &[RingPlan]) -> Result<Toolpath> {
    let mut path = Toolpath::new();
    for plan in plans {
        let nodes = match &plan.kind {
            RingKind::Circle(ring) => xy_circle(settings, ring)?,
            RingKind::HalfCircle(arc) => xz_half_circle(settings, arc)?,
        };
        trace!(layer = plan.layer, sweep = plan.sweep, nodes = nodes.len(), "ring");
        path.append(nodes);
    }
    Ok(path)
}

/// Generate the complete toolpath for `pattern`.
pub fn generate(settings: &PathSettings, pattern: &Pattern) -> Result<Toolpath> {
    let plans = plan(settings, pattern)?;
    let path = discretize_plan(settings, &plans)?;
    info!(
        pattern = pattern.name(),
        rings = plans.len(),
        nodes = path.len(),
        "generated toolpath"
    );
    Ok(path)
}

/// Latitude rings over `layers` spheres, pole to equator and back.
pub fn sphere_xy(settings: &PathSettings, layers: u32, c_offset: f64) -> Result<Toolpath> {
    generate(settings, &Pattern::SphereXy { layers, c_offset })
}

/// Meridian half circles over `layers` spheres.
pub fn sphere_xz(settings: &PathSettings, layers: u32) -> Result<Toolpath> {
    generate(settings, &Pattern::SphereXz { layers })
}

/// Stacked circles over `layers_height` cylinders of `layers_width` rings.
pub fn circle_xy(
    settings: &PathSettings,
    layers_height: u32,
    layers_width: u32,
    c_offset: f64,
) -> Result<Toolpath> {
    generate(
        settings,
        &Pattern::CircleXy {
            layers_height,
            layers_width,
            c_offset,
        },
    )
}
