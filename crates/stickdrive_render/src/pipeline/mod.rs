//! Rendering pipeline components
//!
//! A depth-tested mesh pass for the scene and an alpha-blended overlay pass
//! for the on-screen joystick.

pub mod types;
pub mod mesh_pipeline;
pub mod overlay_pipeline;

pub use types::{
    MeshVertex, MeshUniforms, OverlayVertex, shading_code, SHADING_LIT, SHADING_NORMALS,
};
pub use mesh_pipeline::{GpuMesh, MeshPipeline, DEPTH_FORMAT};
pub use overlay_pipeline::{OverlayPipeline, MAX_OVERLAY_VERTICES};
