#![warn(missing_docs)]

//! sdfcast — ray-march intersection over implicit occupancy fields.
//!
//! Computes, for a ray originating at a point in 3D space, the nearest
//! point at which the ray enters any object in a scene described by
//! signed-occupancy fields, with optional bisection refinement of the
//! entry point. A companion camera layer converts screen pixels into
//! world-space ray directions.
//!
//! # Example
//!
//! ```
//! use sdfcast::{
//!     cast, Camera, CameraSettings, Caster, MarchSettings, Point3, Scene, Sphere, Vec3,
//! };
//!
//! let mut scene = Scene::new();
//! scene.push(Box::new(Sphere::new(Point3::new(5.0, 0.0, 0.0), 1.0)));
//!
//! // direct cast
//! let hit = cast(
//!     &scene,
//!     Point3::origin(),
//!     Vec3::x(),
//!     true,
//!     20.0,
//!     &MarchSettings::default(),
//! );
//! assert!(hit.is_some());
//!
//! // per-pixel cast through a camera
//! let camera = Camera::new(CameraSettings {
//!     theta: 0.0,
//!     phi: 0.0,
//!     aperture: std::f64::consts::PI / 4.0,
//!     width: 640,
//!     height: 480,
//! })
//! .unwrap();
//! let caster = Caster::new(scene, camera, Point3::origin(), MarchSettings::default()).unwrap();
//! assert!(caster.cast_pixel(320, 240, true, 20.0).is_some());
//! ```

pub use sdfcast_camera::{Camera, CameraError, CameraSettings, NormalizedCoord};
pub use sdfcast_field::{
    gradient, normal, Cuboid, Field, FieldKind, HalfSpace, Scene, Sphere,
};
pub use sdfcast_march::{cast, refine_entry, MarchError, MarchSettings, RayHit};
pub use sdfcast_math::{
    angle_between, distance, rotate_about_axis, unit_or_zero, wrap_angle, Dir3, Point3,
    SphericalDir, Vec3, TAU,
};

/// A scene, camera, eye point, and march settings bound together for
/// per-pixel casting.
///
/// Owns a read-only snapshot of the scene for the duration of a batch of
/// casts; each cast is a pure function of the pixel and arguments.
#[derive(Debug)]
pub struct Caster {
    scene: Scene,
    camera: Camera,
    eye: Point3,
    settings: MarchSettings,
}

impl Caster {
    /// Bind a scene, camera, eye point, and validated march settings.
    pub fn new(
        scene: Scene,
        camera: Camera,
        eye: Point3,
        settings: MarchSettings,
    ) -> Result<Self, MarchError> {
        settings.validate()?;
        Ok(Self {
            scene,
            camera,
            eye,
            settings,
        })
    }

    /// The bound scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The bound camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The eye point rays originate from.
    pub fn eye(&self) -> Point3 {
        self.eye
    }

    /// March the ray for screen pixel `(x, y)`.
    pub fn cast_pixel(&self, x: u32, y: u32, refine: bool, max_len: f64) -> Option<RayHit<'_>> {
        let direction = self.camera.pixel_ray(x, y);
        cast(
            &self.scene,
            self.eye,
            direction,
            refine,
            max_len,
            &self.settings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn caster(scene: Scene) -> Caster {
        let camera = Camera::new(CameraSettings {
            theta: 0.0,
            phi: 0.0,
            aperture: PI / 4.0,
            width: 640,
            height: 480,
        })
        .unwrap();
        Caster::new(
            scene,
            camera,
            Point3::origin(),
            MarchSettings {
                step_len: 0.05,
                refine_iters: 16,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_center_pixel_hits_sphere_ahead() {
        let mut scene = Scene::new();
        scene.push(Box::new(Sphere::new(Point3::new(8.0, 0.0, 0.0), 1.3)));

        let caster = caster(scene);
        let hit = caster.cast_pixel(320, 240, true, 20.0).unwrap();
        assert_eq!(hit.field.kind(), FieldKind::Sphere);
        // entry at x = 6.7 on the axis
        assert!((hit.point.x - 6.7).abs() < 1e-4);
        assert!(hit.point.y.abs() < 1e-6);
        assert!(hit.point.z.abs() < 1e-6);
    }

    #[test]
    fn test_edge_pixel_misses_narrow_scene() {
        let mut scene = Scene::new();
        scene.push(Box::new(Sphere::new(Point3::new(8.0, 0.0, 0.0), 0.5)));
        let caster = caster(scene);

        // the leftmost pixel looks 45 degrees off axis
        assert!(caster.cast_pixel(0, 240, true, 20.0).is_none());
        assert!(caster.cast_pixel(320, 240, true, 20.0).is_some());
    }

    #[test]
    fn test_surface_normal_at_hit() {
        let mut scene = Scene::new();
        scene.push(Box::new(Sphere::new(Point3::new(8.0, 0.0, 0.0), 1.3)));
        let caster = caster(scene);

        let hit = caster.cast_pixel(320, 240, true, 20.0).unwrap();
        let n = normal(hit.field, &hit.point);
        // entry face of the sphere: normal points back toward the eye
        assert!((n.x + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let camera = Camera::new(CameraSettings {
            theta: 0.0,
            phi: 0.0,
            aperture: PI / 4.0,
            width: 64,
            height: 64,
        })
        .unwrap();
        let settings = MarchSettings {
            step_len: -1.0,
            refine_iters: 4,
        };
        assert!(Caster::new(Scene::new(), camera, Point3::origin(), settings).is_err());
    }
}
