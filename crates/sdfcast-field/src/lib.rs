#![warn(missing_docs)]

//! Implicit occupancy fields for the sdfcast ray marcher.
//!
//! An object in the scene is anything exposing a scalar occupancy
//! function over 3D space, negative inside the object's volume,
//! non-negative outside, together with the three partial derivatives of
//! that function, used to build surface normals at a hit point.
//!
//! The march itself consumes only [`Field::occupancy`]; the derivative
//! methods and the [`gradient`]/[`normal`] helpers exist for callers that
//! need shading-grade normals after a hit.

use sdfcast_math::{unit_or_zero, Dir3, Point3, Vec3};

/// Central-difference step used by the default derivative implementations.
const DERIV_STEP: f64 = 1e-5;

/// The kind of a field (for match-based dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Solid ball.
    Sphere,
    /// Axis-aligned solid box.
    Cuboid,
    /// Everything behind a plane.
    HalfSpace,
}

/// An implicit solid described by a signed occupancy function.
///
/// The occupancy function sign-encodes containment: negative inside,
/// non-negative outside. It need not be an exact distance field, but it
/// must be continuous enough that a fixed-step march does not skip past
/// features thinner than the step length under normal use.
pub trait Field: Send + Sync + std::fmt::Debug {
    /// Signed occupancy at `p`: negative inside, non-negative outside.
    fn occupancy(&self, p: &Point3) -> f64;

    /// Partial derivative of the occupancy function along x.
    fn d_dx(&self, p: &Point3) -> f64 {
        let a = Point3::new(p.x + DERIV_STEP, p.y, p.z);
        let b = Point3::new(p.x - DERIV_STEP, p.y, p.z);
        (self.occupancy(&a) - self.occupancy(&b)) / (2.0 * DERIV_STEP)
    }

    /// Partial derivative of the occupancy function along y.
    fn d_dy(&self, p: &Point3) -> f64 {
        let a = Point3::new(p.x, p.y + DERIV_STEP, p.z);
        let b = Point3::new(p.x, p.y - DERIV_STEP, p.z);
        (self.occupancy(&a) - self.occupancy(&b)) / (2.0 * DERIV_STEP)
    }

    /// Partial derivative of the occupancy function along z.
    fn d_dz(&self, p: &Point3) -> f64 {
        let a = Point3::new(p.x, p.y, p.z + DERIV_STEP);
        let b = Point3::new(p.x, p.y, p.z - DERIV_STEP);
        (self.occupancy(&a) - self.occupancy(&b)) / (2.0 * DERIV_STEP)
    }

    /// The kind of this field.
    fn kind(&self) -> FieldKind;

    /// Clone this field into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Field>;
}

impl Clone for Box<dyn Field> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Occupancy gradient at `p`, assembled from the three partials.
///
/// Points out of the solid (occupancy increases outward). Not normalized.
pub fn gradient(field: &dyn Field, p: &Point3) -> Vec3 {
    Vec3::new(field.d_dx(p), field.d_dy(p), field.d_dz(p))
}

/// Unit surface normal at `p`, or the zero vector where the gradient
/// vanishes (e.g. at a sphere's center).
pub fn normal(field: &dyn Field, p: &Point3) -> Vec3 {
    unit_or_zero(&gradient(field, p))
}

// =============================================================================
// Sphere
// =============================================================================

/// A solid ball: occupancy `|p - center| - radius`.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center of the ball.
    pub center: Point3,
    /// Radius of the ball.
    pub radius: f64,
}

impl Sphere {
    /// Create a ball from center and radius.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Field for Sphere {
    fn occupancy(&self, p: &Point3) -> f64 {
        (p - self.center).norm() - self.radius
    }

    fn d_dx(&self, p: &Point3) -> f64 {
        let d = p - self.center;
        let len = d.norm();
        if len == 0.0 {
            0.0
        } else {
            d.x / len
        }
    }

    fn d_dy(&self, p: &Point3) -> f64 {
        let d = p - self.center;
        let len = d.norm();
        if len == 0.0 {
            0.0
        } else {
            d.y / len
        }
    }

    fn d_dz(&self, p: &Point3) -> f64 {
        let d = p - self.center;
        let len = d.norm();
        if len == 0.0 {
            0.0
        } else {
            d.z / len
        }
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Sphere
    }

    fn clone_box(&self) -> Box<dyn Field> {
        Box::new(self.clone())
    }
}

// =============================================================================
// Cuboid
// =============================================================================

/// An axis-aligned solid box: occupancy is the largest per-axis overshoot
/// `|p - center|_i - half_extents_i`, negative only when all three axes
/// are inside.
#[derive(Debug, Clone)]
pub struct Cuboid {
    /// Center of the box.
    pub center: Point3,
    /// Half the box extent along each axis.
    pub half_extents: Vec3,
}

impl Cuboid {
    /// Create a box from center and half extents.
    pub fn new(center: Point3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }
}

impl Field for Cuboid {
    fn occupancy(&self, p: &Point3) -> f64 {
        let d = p - self.center;
        let ox = d.x.abs() - self.half_extents.x;
        let oy = d.y.abs() - self.half_extents.y;
        let oz = d.z.abs() - self.half_extents.z;
        ox.max(oy).max(oz)
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Cuboid
    }

    fn clone_box(&self) -> Box<dyn Field> {
        Box::new(self.clone())
    }
}

// =============================================================================
// HalfSpace
// =============================================================================

/// Everything behind a plane: occupancy is the signed distance from the
/// plane, negative on the side the normal points away from.
#[derive(Debug, Clone)]
pub struct HalfSpace {
    /// A point on the boundary plane.
    pub origin: Point3,
    /// Unit normal pointing out of the solid.
    pub normal: Dir3,
}

impl HalfSpace {
    /// Create a half-space from a boundary point and an outward normal.
    /// The normal does not need to be normalized.
    pub fn new(origin: Point3, normal: Vec3) -> Self {
        Self {
            origin,
            normal: Dir3::new_normalize(normal),
        }
    }
}

impl Field for HalfSpace {
    fn occupancy(&self, p: &Point3) -> f64 {
        (p - self.origin).dot(self.normal.as_ref())
    }

    fn d_dx(&self, _p: &Point3) -> f64 {
        self.normal.as_ref().x
    }

    fn d_dy(&self, _p: &Point3) -> f64 {
        self.normal.as_ref().y
    }

    fn d_dz(&self, _p: &Point3) -> f64 {
        self.normal.as_ref().z
    }

    fn kind(&self) -> FieldKind {
        FieldKind::HalfSpace
    }

    fn clone_box(&self) -> Box<dyn Field> {
        Box::new(self.clone())
    }
}

// =============================================================================
// Scene
// =============================================================================

/// An ordered, caller-owned collection of fields.
///
/// The march iterates it start-to-end once per step; iteration order is
/// the tie-break when two fields are entered at the same step. The scene
/// is read-only for the duration of any cast; there is no interior
/// locking, and shared read access from multiple threads is safe because
/// fields are `Send + Sync`.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    fields: Vec<Box<dyn Field>>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field; later fields rank after earlier ones on exact ties.
    pub fn push(&mut self, field: Box<dyn Field>) {
        self.fields.push(field);
    }

    /// Number of fields in the scene.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the scene contains no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&dyn Field> {
        self.fields.get(index).map(|f| f.as_ref())
    }

    /// Iterate the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Field> {
        self.fields.iter().map(|f| f.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_occupancy_signs() {
        let s = Sphere::new(Point3::origin(), 2.0);
        assert!(s.occupancy(&Point3::new(1.0, 0.0, 0.0)) < 0.0);
        assert!(s.occupancy(&Point3::new(3.0, 0.0, 0.0)) > 0.0);
        assert!(s.occupancy(&Point3::new(2.0, 0.0, 0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_normal_radial() {
        let s = Sphere::new(Point3::new(1.0, 0.0, 0.0), 2.0);
        let n = normal(&s, &Point3::new(3.0, 0.0, 0.0));
        assert!((n.x - 1.0).abs() < 1e-12);
        assert!(n.y.abs() < 1e-12);
        assert!(n.z.abs() < 1e-12);
    }

    #[test]
    fn test_sphere_gradient_defined_at_center() {
        let s = Sphere::new(Point3::origin(), 1.0);
        let g = gradient(&s, &Point3::origin());
        assert_eq!(g, Vec3::zeros());
    }

    #[test]
    fn test_cuboid_occupancy() {
        let c = Cuboid::new(Point3::origin(), Vec3::new(1.0, 2.0, 3.0));
        assert!(c.occupancy(&Point3::origin()) < 0.0);
        assert!(c.occupancy(&Point3::new(0.5, 1.5, 2.5)) < 0.0);
        assert!(c.occupancy(&Point3::new(1.5, 0.0, 0.0)) > 0.0);
        // on a face
        assert!(c.occupancy(&Point3::new(1.0, 0.0, 0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_cuboid_finite_difference_normal() {
        let c = Cuboid::new(Point3::origin(), Vec3::new(1.0, 1.0, 1.0));
        // just outside the +x face: gradient should point along +x
        let n = normal(&c, &Point3::new(1.01, 0.0, 0.0));
        assert!((n.x - 1.0).abs() < 1e-9);
        assert!(n.y.abs() < 1e-9);
    }

    #[test]
    fn test_half_space_signed() {
        let h = HalfSpace::new(Point3::origin(), Vec3::z());
        assert!(h.occupancy(&Point3::new(0.0, 0.0, -1.0)) < 0.0);
        assert!(h.occupancy(&Point3::new(5.0, -3.0, 1.0)) > 0.0);
        assert_eq!(h.d_dz(&Point3::origin()), 1.0);
    }

    #[test]
    fn test_scene_preserves_order() {
        let mut scene = Scene::new();
        scene.push(Box::new(Sphere::new(Point3::origin(), 1.0)));
        scene.push(Box::new(Cuboid::new(
            Point3::origin(),
            Vec3::new(1.0, 1.0, 1.0),
        )));
        assert_eq!(scene.len(), 2);
        let kinds: Vec<_> = scene.iter().map(|f| f.kind()).collect();
        assert_eq!(kinds, vec![FieldKind::Sphere, FieldKind::Cuboid]);
        assert_eq!(scene.get(1).unwrap().kind(), FieldKind::Cuboid);
        assert!(scene.get(2).is_none());
    }
}
