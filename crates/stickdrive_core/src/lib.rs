//! Core types for stickdrive
//!
//! This crate provides the scene model and the per-frame motion logic:
//!
//! - [`Transform`] - Position, rotation, and scale in 3D space
//! - [`Material`] / [`Mesh`] - What an entity looks like
//! - [`Entity`] - An object in the world
//! - [`World`] - Container for all entities
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`CameraState`] - Spherical orbit camera
//! - [`MotionIntegrator`] - Applies stick input and orbit angles each tick

mod transform;
mod entity;
mod world;
mod camera;
pub mod motion;

pub use transform::Transform;
pub use entity::{Entity, Material, Mesh, Shading};
pub use world::{World, EntityKey};
pub use camera::{CameraState, ORBIT_TARGET};
pub use motion::{MotionIntegrator, MotionPolicy, TickResult};

// Re-export commonly used types for convenience
pub use stickdrive_math::{Quat, Vec3};
pub use stickdrive_input::{InputVector, OrbitAngles};
