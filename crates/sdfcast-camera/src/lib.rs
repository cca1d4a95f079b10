#![warn(missing_docs)]

//! Camera projection for the sdfcast ray marcher.
//!
//! Maps a screen pixel to a normalized, center-origin coordinate and from
//! there to a world-space ray direction, accounting for a field-of-view
//! aperture and an arbitrary camera orientation in spherical angles.
//!
//! The per-pixel direction is built in two stages: first a unit vector
//! for an un-pitched camera (aperture spread plus the camera's base
//! azimuth), then a rotation of that vector about the horizontal axis
//! perpendicular to the camera's azimuth, by the camera's elevation.
//! Composing the angles by simple addition instead would be wrong once
//! the camera is pitched, because azimuth and elevation offsets are not
//! independent on a tilted frame.

use serde::{Deserialize, Serialize};
use sdfcast_math::{rotate_about_axis, SphericalDir, Vec3};
use std::f64::consts::PI;

pub mod error;

pub use error::{CameraError, Result};

/// A screen pixel remapped to a width-normalized coordinate system.
///
/// The origin is the screen center, right and up are positive, and the
/// horizontal extent is `[-1, 1]`. The vertical scale is tied to the
/// width, so non-square screens span a vertical extent other than
/// `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedCoord {
    /// Horizontal component, `[-1, 1]` across the screen width.
    pub x: f64,
    /// Vertical component, up positive, scaled by the screen width.
    pub y: f64,
}

/// Plain camera parameters, serializable for configuration files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Base azimuth of the view direction, radians.
    pub theta: f64,
    /// Base elevation of the view direction, radians.
    pub phi: f64,
    /// Field-of-view half-angle, radians, in `(0, pi/2)`.
    pub aperture: f64,
    /// Screen width in pixels.
    pub width: u32,
    /// Screen height in pixels.
    pub height: u32,
}

/// A validated camera: orientation, aperture, and screen dimensions.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    direction: SphericalDir,
    aperture: f64,
    width: u32,
    height: u32,
}

impl Camera {
    /// Build a camera from settings.
    ///
    /// Rejects apertures outside `(0, pi/2)` (the mapping takes the
    /// tangent of the aperture) and screens with a zero dimension.
    pub fn new(settings: CameraSettings) -> Result<Self> {
        if !(settings.aperture > 0.0 && settings.aperture < PI / 2.0) {
            return Err(CameraError::InvalidAperture(settings.aperture));
        }
        if settings.width == 0 || settings.height == 0 {
            return Err(CameraError::EmptyScreen(settings.width, settings.height));
        }
        Ok(Self {
            direction: SphericalDir::new(settings.theta, settings.phi),
            aperture: settings.aperture,
            width: settings.width,
            height: settings.height,
        })
    }

    /// The camera's base view direction.
    pub fn direction(&self) -> SphericalDir {
        self.direction
    }

    /// The field-of-view half-angle in radians.
    pub fn aperture(&self) -> f64 {
        self.aperture
    }

    /// Screen dimensions as `(width, height)` in pixels.
    pub fn screen(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Remap a pixel to the width-normalized, center-origin system.
    ///
    /// `(2x/w - 1, (2(h - y) - h) / w)`; the center pixel of an
    /// even-sized screen maps exactly to `(0, 0)`.
    pub fn normalize_pixel(&self, x: u32, y: u32) -> NormalizedCoord {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        NormalizedCoord {
            x: (2.0 * f64::from(x)) / w - 1.0,
            y: (2.0 * (h - f64::from(y)) - h) / w,
        }
    }

    /// Ray direction for a normalized screen coordinate.
    ///
    /// The coordinate `(0, 0)` maps to the camera's own direction
    /// unchanged, for any camera pitch.
    pub fn ray_angles(&self, c: NormalizedCoord) -> SphericalDir {
        let tan_ap = self.aperture.tan();

        // aperture spread for an un-pitched camera
        let theta = -(c.x * tan_ap).atan();
        let phi = (c.y * tan_ap).atan2((1.0 / theta.cos()).abs());

        // swing to the camera's azimuth, then tilt the whole frame to
        // the camera's elevation about the horizontal axis perpendicular
        // to the view azimuth
        let spread = SphericalDir::new(theta + self.direction.theta, phi).to_vector();
        let axis = SphericalDir::new(self.direction.theta - PI / 2.0, 0.0).to_vector();
        let tilted = rotate_about_axis(&spread, &axis, self.direction.phi);

        SphericalDir::from_vector(&tilted)
    }

    /// World-space ray direction for a pixel, as a unit vector.
    pub fn pixel_ray(&self, x: u32, y: u32) -> Vec3 {
        self.ray_angles(self.normalize_pixel(x, y)).to_vector()
    }
}
