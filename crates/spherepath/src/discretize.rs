//! Ring and arc discretization.
//!
//! Both discretizers step an angle by the arc-length resolution so that
//! consecutive nodes sit `resolution` apart on the circle. The first node of
//! every ring/arc is a rapid move; the rest extrude a fixed bead.

use serde::{Deserialize, Serialize};
use spherepath_math::{arc_length_step_deg, radial_orientation, Point3, Vec3};

use crate::error::{PathError, Result};
use crate::node::MotionNode;
use crate::PathSettings;

/// Order in which a sweep visits its positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepDirection {
    /// Increasing angle/index.
    #[default]
    Ascending,
    /// Decreasing angle/index.
    Descending,
}

impl SweepDirection {
    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            SweepDirection::Ascending => SweepDirection::Descending,
            SweepDirection::Descending => SweepDirection::Ascending,
        }
    }

    /// Is this the ascending direction?
    pub fn is_ascending(self) -> bool {
        self == SweepDirection::Ascending
    }

    /// Move `value` one `step` in this direction.
    pub fn advance(self, value: f64, step: f64) -> f64 {
        match self {
            SweepDirection::Ascending => value + step,
            SweepDirection::Descending => value - step,
        }
    }
}

/// A full circle in a plane parallel to XY.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleRing {
    /// Circle radius (mm).
    pub radius: f64,
    /// Height of the circle above its center of curvature (mm).
    pub z: f64,
    /// Extra height added to every emitted position (mm).
    pub vertical_offset: f64,
    /// Rotation at which the ring starts and ends (degrees).
    pub start_angle: f64,
}

/// A half circle in a plane parallel to XZ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfCircleArc {
    /// Arc radius (mm).
    pub radius: f64,
    /// Distance of the arc's plane from the sphere center (mm).
    pub y: f64,
    /// Extra height added to every emitted position (mm).
    pub vertical_offset: f64,
    /// Ascending runs from +X over the top toward -X.
    pub direction: SweepDirection,
}

/// Discretize a full XY circle.
///
/// Steps from `start_angle` through `start_angle + 360` inclusive. A zero
/// radius collapses to a single rapid move at the circle center.
pub fn xy_circle(settings: &PathSettings, ring: &CircleRing) -> Result<Vec<MotionNode>> {
    check_finite("z", ring.z)?;
    check_finite("vertical_offset", ring.vertical_offset)?;
    check_finite("start_angle", ring.start_angle)?;
    check_radius(ring.radius)?;

    if ring.radius == 0.0 {
        let center = Point3::new(0.0, 0.0, ring.z);
        let orientation = orientation_at(&center)?;
        return Ok(vec![MotionNode::rapid(
            lift(&center, ring.vertical_offset),
            orientation,
        )]);
    }

    let step = arc_length_step_deg(settings.resolution, ring.radius);
    let end = 360.0 + ring.start_angle;
    check_step(step, end)?;

    let bead = settings.extrusion_per_step();
    let mut nodes = Vec::with_capacity((360.0 / step) as usize + 2);
    let mut c = ring.start_angle;
    while c <= end {
        let (sin_c, cos_c) = c.to_radians().sin_cos();
        let local = Point3::new(ring.radius * sin_c, ring.radius * cos_c, ring.z);
        nodes.push(emit(&nodes, &local, ring.vertical_offset, bead)?);
        c += step;
    }
    Ok(nodes)
}

/// Discretize a half circle in the XZ plane at distance `y`.
///
/// Ascending arcs start at 0 degrees and stop before 180; descending arcs
/// start at the last whole step at or below 180 and stop before 0. Which
/// endpoint is included therefore depends on the direction. A zero radius
/// yields no nodes.
pub fn xz_half_circle(settings: &PathSettings, arc: &HalfCircleArc) -> Result<Vec<MotionNode>> {
    check_finite("y", arc.y)?;
    check_finite("vertical_offset", arc.vertical_offset)?;
    check_radius(arc.radius)?;

    if arc.radius == 0.0 {
        return Ok(Vec::new());
    }

    let step = arc_length_step_deg(settings.resolution, arc.radius);
    check_step(step, 180.0)?;

    let ascending = arc.direction.is_ascending();
    let mut counter: i64 = if ascending { 0 } else { (180.0 / step) as i64 };
    let in_range = |counter: i64| {
        let angle = step * counter as f64;
        if ascending {
            angle < 180.0
        } else {
            angle > 0.0
        }
    };

    let bead = settings.extrusion_per_step();
    let mut nodes = Vec::with_capacity((180.0 / step) as usize + 1);
    while in_range(counter) {
        let (sin_t, cos_t) = (step * counter as f64).to_radians().sin_cos();
        let local = Point3::new(cos_t * arc.radius, arc.y, sin_t * arc.radius);
        counter += if ascending { 1 } else { -1 };
        nodes.push(emit(&nodes, &local, arc.vertical_offset, bead)?);
    }
    Ok(nodes)
}

fn emit(
    ring_so_far: &[MotionNode],
    local: &Point3,
    vertical_offset: f64,
    bead: f64,
) -> Result<MotionNode> {
    let orientation = orientation_at(local)?;
    let position = lift(local, vertical_offset);
    // Moving onto the ring is a rapid; everything after lays down material.
    Ok(if ring_so_far.is_empty() {
        MotionNode::rapid(position, orientation)
    } else {
        MotionNode::extrude(position, orientation, bead)
    })
}

fn lift(local: &Point3, vertical_offset: f64) -> Point3 {
    Point3::new(local.x, local.y, local.z + vertical_offset)
}

fn orientation_at(local: &Point3) -> Result<Vec3> {
    radial_orientation(local).ok_or_else(|| {
        PathError::DegenerateGeometry(format!(
            "no tool orientation at ({}, {}, {})",
            local.x, local.y, local.z
        ))
    })
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PathError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

fn check_radius(radius: f64) -> Result<()> {
    check_finite("radius", radius)?;
    if radius < 0.0 {
        return Err(PathError::InvalidParameter {
            name: "radius",
            value: radius,
            reason: "must not be negative",
        });
    }
    Ok(())
}

/// The sweep must make progress all the way up to `limit`.
fn check_step(step: f64, limit: f64) -> Result<()> {
    if !(step > 0.0 && limit.abs() + step > limit.abs()) {
        return Err(PathError::DegenerateGeometry(format!(
            "angular step {step} degrees cannot advance a sweep to {limit}"
        )));
    }
    Ok(())
}
