//! Spherical orbit camera state
//!
//! The camera sits on a sphere of fixed radius around the origin and always
//! aims at it. Azimuth 0 / elevation 0 is on the +Z axis.

use stickdrive_input::{clamp_elevation, OrbitAngles};
use stickdrive_math::Vec3;
use crate::Transform;

/// Point the camera aims at
pub const ORBIT_TARGET: Vec3 = Vec3::ZERO;

/// Camera azimuth/elevation and orbit radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    azimuth: f32,
    elevation: f32,
    /// Distance from the orbit target
    pub radius: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl CameraState {
    pub fn new(radius: f32) -> Self {
        Self {
            azimuth: 0.0,
            elevation: 0.0,
            radius,
        }
    }

    /// Set both angles; elevation is clamped to the orbit limit
    pub fn set_angles(&mut self, angles: OrbitAngles) {
        self.azimuth = angles.azimuth;
        self.elevation = clamp_elevation(angles.elevation);
    }

    pub fn angles(&self) -> OrbitAngles {
        OrbitAngles {
            azimuth: self.azimuth,
            elevation: self.elevation,
        }
    }

    #[inline]
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    #[inline]
    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// Spherical to Cartesian: `r * (cos e sin a, sin e, cos e cos a)`
    pub fn position(&self) -> Vec3 {
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        let (sin_e, cos_e) = self.elevation.sin_cos();
        Vec3::new(cos_e * sin_a, sin_e, cos_e * cos_a) * self.radius
    }

    /// Move `transform` onto the orbit and aim it at the target
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.look_at(self.position(), ORBIT_TARGET, Vec3::Y);
    }
}
