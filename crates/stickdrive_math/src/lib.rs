//! 3D Mathematics Library
//!
//! This crate provides the vector, rotation, and matrix types shared by the
//! stickdrive crates.
//!
//! ## Core Types
//!
//! - [`Vec2`] - Screen-space 2D vector
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion rotation
//! - [`Mat4`] - 4x4 column-major matrix and helpers in [`mat4`]

mod vec2;
mod vec3;
mod quat;
pub mod mat4;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use quat::Quat;
pub use mat4::Mat4;
