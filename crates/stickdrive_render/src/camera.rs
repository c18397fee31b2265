//! View and projection matrices for a camera entity

use stickdrive_core::Transform;
use stickdrive_math::{mat4, Mat4};

/// Perspective projection parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        mat4::perspective(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// World-to-view matrix for a camera placed by `transform`
pub fn view_matrix(camera: &Transform) -> Mat4 {
    let eye = camera.position;
    mat4::look_at(eye, eye + camera.forward(), camera.up())
}

/// `projection * view`
pub fn view_projection(camera: &Transform, projection: &Projection, aspect: f32) -> Mat4 {
    mat4::mul(projection.matrix(aspect), view_matrix(camera))
}
