//! Rendering Library
//!
//! This crate provides the wgpu-based drawing for stickdrive: one
//! depth-tested pass for the scene and a 2D pass for the joystick overlay.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera`] - View/projection matrices from a camera entity
//! - [`pipeline::MeshPipeline`] - Lit or normal-colored meshes
//! - [`pipeline::OverlayPipeline`] - Alpha-blended screen-space triangles
//! - [`geometry::BoxMesh`] / [`geometry::JoystickOverlay`] - CPU geometry

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod geometry;

// Re-export core types for convenience
pub use stickdrive_core::{Entity, EntityKey, Material, Mesh, Shading, Transform, World};
