//! GPU-compatible data types for the mesh and overlay pipelines
//!
//! These types match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use stickdrive_core::Shading;
use stickdrive_math::mat4;

/// A vertex of a lit mesh
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Object-space surface normal
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// `MeshUniforms::shading` value for [`Shading::Lit`]
pub const SHADING_LIT: u32 = 0;
/// `MeshUniforms::shading` value for [`Shading::Normals`]
pub const SHADING_NORMALS: u32 = 1;

/// Per-draw uniforms for the mesh pass
/// Layout: 176 bytes total (must match mesh.wgsl Uniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// Object to world (64 bytes)
    pub model: [[f32; 4]; 4],
    /// RGBA base color (16 bytes)
    pub base_color: [f32; 4],
    /// Light direction + shading selector (16 bytes)
    pub light_dir: [f32; 3],
    pub shading: u32,
    /// Lighting parameters (16 bytes)
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    pub _padding: [f32; 2],
}

impl Default for MeshUniforms {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
            model: mat4::IDENTITY,
            base_color: [1.0; 4],
            light_dir: [0.5, 1.0, 0.3],
            shading: SHADING_LIT,
            ambient_strength: 0.3,
            diffuse_strength: 0.7,
            _padding: [0.0; 2],
        }
    }
}

/// Map a material shading mode to its shader selector
pub fn shading_code(shading: Shading) -> u32 {
    match shading {
        Shading::Lit => SHADING_LIT,
        Shading::Normals => SHADING_NORMALS,
    }
}

/// A 2D overlay vertex in normalized device coordinates
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    /// Straight (non-premultiplied) RGBA
    pub color: [f32; 4],
}
