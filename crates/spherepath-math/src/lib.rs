#![warn(missing_docs)]

//! Math types for the spherepath toolpath generator.
//!
//! Thin wrappers around nalgebra plus the spherical geometry the path
//! generator is built on: Cartesian/spherical conversions, the spherical
//! cap solver, and the mapping from tool vectors to rotary machine axes.
//!
//! All angles crossing this API are in degrees.

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point expressed as radius and angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    /// Distance from the origin.
    pub radius: f64,
    /// Angle from the +Z axis, in [0, 180] degrees.
    pub polar_deg: f64,
    /// Angle from the +X axis in the XY plane, in (-180, 180] degrees.
    pub azimuth_deg: f64,
}

/// Convert Cartesian coordinates to spherical radius and angles.
///
/// Returns `None` at the origin, where neither angle is defined.
pub fn cartesian_to_spherical(x: f64, y: f64, z: f64) -> Option<Spherical> {
    let radius = (x * x + y * y + z * z).sqrt();
    if radius == 0.0 || !radius.is_finite() {
        return None;
    }
    Some(Spherical {
        radius,
        polar_deg: (z / radius).acos().to_degrees(),
        azimuth_deg: y.atan2(x).to_degrees(),
    })
}

/// Unit vector pointing along the given polar and azimuth angles.
pub fn spherical_angles_to_unit_vector(polar_deg: f64, azimuth_deg: f64) -> Vec3 {
    let (sin_p, cos_p) = polar_deg.to_radians().sin_cos();
    let (sin_a, cos_a) = azimuth_deg.to_radians().sin_cos();
    Vec3::new(cos_a * sin_p, sin_a * sin_p, cos_p)
}

/// Tool orientation for a point: the unit vector from the local center
/// through the point, obtained by going through spherical angles.
pub fn radial_orientation(point: &Point3) -> Option<Vec3> {
    cartesian_to_spherical(point.x, point.y, point.z)
        .map(|s| spherical_angles_to_unit_vector(s.polar_deg, s.azimuth_deg))
}

/// Angle (degrees) subtending an arc of `length` on a circle of `radius`.
///
/// Infinite for a zero radius.
pub fn arc_length_step_deg(length: f64, radius: f64) -> f64 {
    (180.0 * length) / (std::f64::consts::PI * radius)
}

/// Latitude circle of a sphere at a given angle from the pole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalCap {
    /// Height of the circle's plane above the sphere center.
    pub axial_offset: f64,
    /// Radius of the circle.
    pub latitude_radius: f64,
}

/// Solve the spherical cap at `angle_deg` from the pole of a sphere of
/// `radius`.
///
/// `angle_deg = 0` is the pole (offset `radius`, circle radius 0) and
/// `angle_deg = 90` the equator (offset 0, circle radius `radius`). Angles
/// past 90 continue into the lower hemisphere.
pub fn spherical_cap(angle_deg: f64, radius: f64) -> SphericalCap {
    let axial_offset = radius * (90.0 - angle_deg).to_radians().sin();
    let cap_height = radius - axial_offset;
    // Rounding can push the product a hair below zero near the poles.
    let latitude_radius = (cap_height * (2.0 * radius - cap_height)).max(0.0).sqrt();
    SphericalCap {
        axial_offset,
        latitude_radius,
    }
}

/// Machine angles for a 5-axis head: A tilts away from +Z, C turns about Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotaryAxes {
    /// Tilt (degrees).
    pub a_deg: f64,
    /// Rotation (degrees).
    pub c_deg: f64,
}

impl RotaryAxes {
    /// Angles that bring `orientation` onto +Z. `None` for a zero vector.
    pub fn from_orientation(orientation: &Vec3) -> Option<Self> {
        cartesian_to_spherical(orientation.x, orientation.y, orientation.z).map(|s| Self {
            a_deg: s.polar_deg,
            c_deg: s.azimuth_deg,
        })
    }

    /// Rotation from part coordinates into the machine frame: `Rz(-C)`
    /// followed by `Ry(-A)`.
    pub fn machine_rotation(&self) -> Rotation3<f64> {
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), -self.c_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), -self.a_deg.to_radians());
        ry * rz
    }

    /// Map a part-space point into the machine frame.
    pub fn to_machine(&self, p: &Point3) -> Point3 {
        self.machine_rotation() * *p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cartesian_to_spherical_axes() {
        let s = cartesian_to_spherical(0.0, 0.0, 5.0).unwrap();
        assert_abs_diff_eq!(s.radius, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.polar_deg, 0.0, epsilon = 1e-12);

        let s = cartesian_to_spherical(0.0, 2.0, 0.0).unwrap();
        assert_abs_diff_eq!(s.polar_deg, 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.azimuth_deg, 90.0, epsilon = 1e-12);

        let s = cartesian_to_spherical(-1.0, 0.0, -1.0).unwrap();
        assert_abs_diff_eq!(s.polar_deg, 135.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.azimuth_deg, 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_origin_has_no_angles() {
        assert!(cartesian_to_spherical(0.0, 0.0, 0.0).is_none());
        assert!(radial_orientation(&Point3::origin()).is_none());
    }

    #[test]
    fn test_round_trip_matches_normalized_point() {
        let points = [
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-4.5, 0.25, -1.0),
            Point3::new(0.0, -7.0, 0.1),
            Point3::new(3.0, -3.0, 0.0),
        ];
        for p in points {
            let v = radial_orientation(&p).unwrap();
            let expected = p.coords.normalize();
            assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!((v - expected).norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_arc_length_step() {
        // A full circumference of arc is 360 degrees.
        let r = 7.5;
        let circumference = 2.0 * std::f64::consts::PI * r;
        assert_abs_diff_eq!(arc_length_step_deg(circumference, r), 360.0, epsilon = 1e-9);
        assert!(arc_length_step_deg(0.1, 0.0).is_infinite());
    }

    #[test]
    fn test_cap_equator_and_pole() {
        let equator = spherical_cap(90.0, 12.5);
        assert_abs_diff_eq!(equator.axial_offset, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(equator.latitude_radius, 12.5, epsilon = 1e-12);

        let pole = spherical_cap(0.0, 12.5);
        assert_abs_diff_eq!(pole.axial_offset, 12.5, epsilon = 1e-12);
        assert_eq!(pole.latitude_radius, 0.0);
    }

    #[test]
    fn test_cap_point_lies_on_sphere() {
        for angle in [10.0, 33.0, 60.0, 120.0, 179.0] {
            let cap = spherical_cap(angle, 4.0);
            let r = (cap.axial_offset.powi(2) + cap.latitude_radius.powi(2)).sqrt();
            assert_abs_diff_eq!(r, 4.0, epsilon = 1e-9);
        }
        // Lower hemisphere has a negative offset.
        assert!(spherical_cap(135.0, 4.0).axial_offset < 0.0);
    }

    #[test]
    fn test_rotary_axes_bring_tool_vertical() {
        let n = spherical_angles_to_unit_vector(35.0, -120.0);
        let axes = RotaryAxes::from_orientation(&n).unwrap();
        assert_abs_diff_eq!(axes.a_deg, 35.0, epsilon = 1e-9);
        assert_abs_diff_eq!(axes.c_deg, -120.0, epsilon = 1e-9);

        let rotated = axes.machine_rotation() * n;
        assert_abs_diff_eq!((rotated - Vec3::z()).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_machine_frame_preserves_distance() {
        let axes = RotaryAxes {
            a_deg: 45.0,
            c_deg: 30.0,
        };
        let p = Point3::new(3.0, -1.0, 2.0);
        let m = axes.to_machine(&p);
        assert_abs_diff_eq!(m.coords.norm(), p.coords.norm(), epsilon = 1e-12);
    }
}
