#![warn(missing_docs)]

//! Math types for the sdfcast ray marcher.
//!
//! Thin wrappers around nalgebra providing the geometry primitives the
//! marcher and camera layers consume: points, vectors, unit directions,
//! spherical orientations, and the handful of free functions (angle
//! wrapping, zero-safe normalization, axis-angle rotation) that nalgebra
//! does not provide in the exact shape needed here.

use nalgebra::{Unit, Vector3};
use std::f64::consts::PI;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Full turn in radians.
pub const TAU: f64 = 2.0 * PI;

/// Wrap `value` into `[0.0, period)`.
///
/// Single division-based remainder; the result is always non-negative and
/// strictly less than `period` for any finite input, however far out of
/// range. Wrapping an already-in-range value is a no-op.
pub fn wrap_angle(value: f64, period: f64) -> f64 {
    let r = value.rem_euclid(period);
    // rem_euclid of a tiny negative value can round up to the period itself
    if r >= period {
        0.0
    } else {
        r
    }
}

/// Normalize a vector, mapping the zero vector to itself.
///
/// For any non-zero `v` the result has magnitude 1. A zero-length input
/// yields the zero vector, a defined degenerate case, not an error.
pub fn unit_or_zero(v: &Vec3) -> Vec3 {
    let mag = v.norm();
    if mag == 0.0 {
        Vec3::zeros()
    } else {
        v / mag
    }
}

/// Angle between two vectors via `acos(dot / (|a||b|))`.
///
/// Undefined for zero-magnitude operands: the division produces NaN and no
/// guard is applied. Callers must keep both vectors non-zero.
pub fn angle_between(a: &Vec3, b: &Vec3) -> f64 {
    (a.dot(b) / (a.norm() * b.norm())).acos()
}

/// Rotate `v` about `axis` by `theta` radians (Rodrigues' formula).
///
/// The axis is normalized internally; a zero axis degenerates to scaling
/// `v` by `cos(theta)`.
pub fn rotate_about_axis(v: &Vec3, axis: &Vec3, theta: f64) -> Vec3 {
    let u = unit_or_zero(axis);
    let (sin_t, cos_t) = theta.sin_cos();
    v * cos_t + u.cross(v) * sin_t + u * u.dot(v) * (1.0 - cos_t)
}

/// Euclidean distance between two points.
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// A direction in spherical angles: azimuth `theta`, elevation `phi`.
///
/// `theta` is measured in the horizontal (xy) plane from +x toward +y and
/// is kept wrapped into `[0, 2π)`. `phi` is the elevation above that plane
/// and is left unconstrained; callers keep it within `[-π/2, π/2]` when a
/// valid unit vector is required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalDir {
    /// Azimuth in radians, wrapped into `[0, 2π)`.
    pub theta: f64,
    /// Elevation in radians.
    pub phi: f64,
}

impl SphericalDir {
    /// Create a spherical direction, wrapping the azimuth into `[0, 2π)`.
    pub fn new(theta: f64, phi: f64) -> Self {
        Self {
            theta: wrap_angle(theta, TAU),
            phi,
        }
    }

    /// The unit vector `(cosθ·cosφ, sinθ·cosφ, sinφ)`.
    pub fn to_vector(&self) -> Vec3 {
        let (sin_t, cos_t) = self.theta.sin_cos();
        let (sin_p, cos_p) = self.phi.sin_cos();
        Vec3::new(cos_t * cos_p, sin_t * cos_p, sin_p)
    }

    /// Recover spherical angles from a direction vector.
    ///
    /// Azimuth via `atan2(y, x)` wrapped into `[0, 2π)`; elevation via
    /// `atan2(z, sqrt(x² + y²))`, range `(-π/2, π/2]`. For unit vectors
    /// this is the exact inverse of [`SphericalDir::to_vector`] up to
    /// floating-point tolerance.
    pub fn from_vector(v: &Vec3) -> Self {
        let theta = wrap_angle(v.y.atan2(v.x), TAU);
        let base_len = (v.x * v.x + v.y * v.y).sqrt();
        let phi = v.z.atan2(base_len);
        Self { theta, phi }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_in_range_is_noop() {
        assert_eq!(wrap_angle(0.0, TAU), 0.0);
        assert_eq!(wrap_angle(1.5, TAU), 1.5);
        assert!(wrap_angle(TAU - 1e-9, TAU) < TAU);
    }

    #[test]
    fn test_wrap_periodic() {
        for k in [-3i32, -1, 1, 2, 7] {
            let base = 1.25;
            let wrapped = wrap_angle(base + TAU * k as f64, TAU);
            assert!((wrapped - base).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wrap_negative() {
        let w = wrap_angle(-PI / 2.0, TAU);
        assert!((w - 3.0 * PI / 2.0).abs() < 1e-12);
        // tiny negative input must not round up to the period itself
        let w2 = wrap_angle(-1e-300, TAU);
        assert!(w2 >= 0.0 && w2 < TAU);
    }

    #[test]
    fn test_unit_or_zero() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        let u = unit_or_zero(&v);
        assert!((u.norm() - 1.0).abs() < 1e-12);
        assert!((u.x - 0.6).abs() < 1e-12);

        let z = unit_or_zero(&Vec3::zeros());
        assert_eq!(z, Vec3::zeros());
    }

    #[test]
    fn test_angle_between_orthogonal() {
        let a = Vec3::x();
        let b = Vec3::y();
        assert!((angle_between(&a, &b) - PI / 2.0).abs() < 1e-12);
        // magnitude must not matter
        assert!((angle_between(&(a * 5.0), &(b * 0.25)) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_about_z() {
        let v = Vec3::x();
        let r = rotate_about_axis(&v, &Vec3::z(), PI / 2.0);
        assert!(r.x.abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
        assert!(r.z.abs() < 1e-12);
    }

    #[test]
    fn test_rotate_unnormalized_axis() {
        // axis is normalized internally, so scaling it changes nothing
        let v = Vec3::new(1.0, 2.0, 3.0);
        let a = rotate_about_axis(&v, &Vec3::new(0.0, 0.0, 10.0), 1.0);
        let b = rotate_about_axis(&v, &Vec3::z(), 1.0);
        assert!((a - b).norm() < 1e-12);
    }

    #[test]
    fn test_spherical_round_trip() {
        let cases = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.577350269, 0.577350269, 0.577350269),
            Vec3::new(0.0, -0.707106781, 0.707106781),
        ];
        for v in cases {
            let angles = SphericalDir::from_vector(&v);
            let back = angles.to_vector();
            assert_relative_eq!(back.x, v.x, epsilon = 1e-8);
            assert_relative_eq!(back.y, v.y, epsilon = 1e-8);
            assert_relative_eq!(back.z, v.z, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_spherical_theta_wrapped() {
        let d = SphericalDir::new(-PI / 4.0, 0.1);
        assert!(d.theta >= 0.0 && d.theta < TAU);
        assert!((d.theta - 7.0 * PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 3.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
    }
}
