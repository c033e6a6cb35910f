//! Circular arc linearization.
//!
//! Replaces a circular move with the chord points a `G1`-only controller can
//! follow. Points are stepped at a fixed angle from the start, and the exact
//! end point is always appended.

use serde::{Deserialize, Serialize};
use spherepath_math::{Point3, Vec3};
use tracing::debug;

use crate::error::{GcodeError, Result};

/// Closer than this, two points count as the same point.
const COINCIDENT_TOLERANCE: f64 = 1e-8;

/// Turning sense about the arc axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcDirection {
    /// `G2`.
    Clockwise,
    /// `G3`.
    CounterClockwise,
}

/// Linearize the arc from `start` to `end` around `center`, taking the short
/// way round in the plane of the three points.
///
/// Half circles are ambiguous here; use [`linearize_arc_about`] for them.
pub fn linearize_arc(
    start: &Point3,
    end: &Point3,
    center: &Point3,
    step_deg: f64,
) -> Result<Vec<Point3>> {
    check_step(step_deg)?;
    check_ends(start, end)?;

    let axis = (start - center).cross(&(end - center));
    if axis.norm() <= COINCIDENT_TOLERANCE {
        return Err(GcodeError::DegenerateArc(
            "start, end and center are collinear",
        ));
    }
    sweep(start, end, center, &axis.normalize(), step_deg)
}

/// Linearize the arc from `start` to `end` turning `direction` about `axis`
/// through `center`.
///
/// Any offset of `end` along the axis is spread evenly over the sweep, which
/// makes the result a helix.
pub fn linearize_arc_about(
    start: &Point3,
    end: &Point3,
    center: &Point3,
    axis: &Vec3,
    direction: ArcDirection,
    step_deg: f64,
) -> Result<Vec<Point3>> {
    check_step(step_deg)?;
    check_ends(start, end)?;

    let axis = axis
        .try_normalize(f64::EPSILON)
        .ok_or(GcodeError::DegenerateArc("arc axis has zero length"))?;
    let axis = match direction {
        ArcDirection::CounterClockwise => axis,
        ArcDirection::Clockwise => -axis,
    };
    sweep(start, end, center, &axis, step_deg)
}

/// Step counter-clockwise about the unit `axis` from `start` until the
/// angle of `end` is reached.
fn sweep(
    start: &Point3,
    end: &Point3,
    center: &Point3,
    axis: &Vec3,
    step_deg: f64,
) -> Result<Vec<Point3>> {
    let axis = *axis;
    let from = start - center;
    let to = end - center;
    let from_height = from.dot(&axis);
    let to_height = to.dot(&axis);

    let radial = from - axis * from_height;
    let radius = radial.norm();
    if radius <= COINCIDENT_TOLERANCE {
        return Err(GcodeError::DegenerateArc("start lies on the arc axis"));
    }
    let u = radial / radius;
    let v = axis.cross(&u);

    let mut total = to.dot(&v).atan2(to.dot(&u)).to_degrees();
    if total <= 0.0 {
        total += 360.0;
    }

    let mut points = Vec::new();
    let mut index = 0u64;
    let mut angle = 0.0_f64;
    while angle < total {
        let (sin_a, cos_a) = angle.to_radians().sin_cos();
        let height = from_height + (to_height - from_height) * (angle / total);
        points.push(center + u * (radius * cos_a) + v * (radius * sin_a) + axis * height);
        index += 1;
        angle = step_deg * index as f64;
    }
    points.push(*end);

    debug!(radius, sweep_deg = total, points = points.len(), "linearized arc");
    Ok(points)
}

fn check_step(step_deg: f64) -> Result<()> {
    if step_deg.is_finite() && step_deg > 0.0 {
        Ok(())
    } else {
        Err(GcodeError::InvalidArcStep(step_deg))
    }
}

fn check_ends(start: &Point3, end: &Point3) -> Result<()> {
    if (end - start).norm() <= COINCIDENT_TOLERANCE {
        return Err(GcodeError::DegenerateArc("start and end coincide"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quarter_arc() {
        let points = linearize_arc(
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
            &Point3::origin(),
            25.0,
        )
        .unwrap();

        // 0, 25, 50 and 75 degrees, then the end point.
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], Point3::new(1.0, 0.0, 0.0));
        for (i, p) in points[..4].iter().enumerate() {
            let expected = (25.0 * i as f64).to_radians();
            assert_abs_diff_eq!(p.x, expected.cos(), epsilon = 1e-12);
            assert_abs_diff_eq!(p.y, expected.sin(), epsilon = 1e-12);
            assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_end_point_appended_exactly() {
        let center = Point3::new(2.0, -1.0, 3.0);
        let start = Point3::new(2.0, 1.0, 3.0);
        let end = Point3::new(2.0, -1.0, 5.0);
        let points = linearize_arc(&start, &end, &center, 7.0).unwrap();

        assert_eq!(*points.last().unwrap(), end);
        for p in &points {
            assert_abs_diff_eq!((p - center).norm(), 2.0, epsilon = 1e-12);
            assert_abs_diff_eq!(p.x, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_direction_picks_the_way_round() {
        let start = Point3::new(1.0, 0.0, 0.0);
        let end = Point3::new(0.0, -1.0, 0.0);
        let center = Point3::origin();
        let z = Vec3::z();

        let cw = linearize_arc_about(&start, &end, &center, &z, ArcDirection::Clockwise, 25.0)
            .unwrap();
        let ccw =
            linearize_arc_about(&start, &end, &center, &z, ArcDirection::CounterClockwise, 25.0)
                .unwrap();

        // 90 degrees one way, 270 the other.
        assert_eq!(cw.len(), 5);
        assert_eq!(ccw.len(), 12);
        assert!(cw[1].y < 0.0);
        assert!(ccw[1].y > 0.0);
    }

    #[test]
    fn test_half_circle_about_axis() {
        let points = linearize_arc_about(
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(-1.0, 0.0, 0.0),
            &Point3::origin(),
            &Vec3::z(),
            ArcDirection::CounterClockwise,
            45.0,
        )
        .unwrap();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.y >= -1e-12));
    }

    #[test]
    fn test_helical_height_interpolates() {
        let points = linearize_arc_about(
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, -1.0, 2.0),
            &Point3::origin(),
            &Vec3::z(),
            ArcDirection::Clockwise,
            25.0,
        )
        .unwrap();
        assert_eq!(points.len(), 5);
        assert!(points.windows(2).all(|w| w[1].z > w[0].z));
        for p in &points {
            assert_abs_diff_eq!(p.x.hypot(p.y), 1.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(points[3].z, 2.0 * 75.0 / 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_bad_step() {
        let (a, b, c) = (
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::origin(),
        );
        for step in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                linearize_arc(&a, &b, &c, step),
                Err(GcodeError::InvalidArcStep(_))
            ));
        }
    }

    #[test]
    fn test_rejects_degenerate_arcs() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let origin = Point3::origin();

        let err = linearize_arc(&a, &a, &origin, 5.0).unwrap_err();
        assert_eq!(err.to_string(), "degenerate arc: start and end coincide");

        let opposite = Point3::new(-1.0, 0.0, 0.0);
        assert!(matches!(
            linearize_arc(&a, &opposite, &origin, 5.0),
            Err(GcodeError::DegenerateArc(_))
        ));

        let b = Point3::new(0.0, 1.0, 0.0);
        assert!(linearize_arc_about(&a, &b, &origin, &Vec3::zeros(), ArcDirection::Clockwise, 5.0)
            .is_err());
        assert!(linearize_arc_about(&a, &b, &origin, &Vec3::x(), ArcDirection::Clockwise, 5.0)
            .is_err());
    }
}
