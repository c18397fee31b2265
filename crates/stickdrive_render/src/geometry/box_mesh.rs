//! Axis-aligned box geometry
//!
//! Each face gets its own four vertices so normals stay flat: 24 vertices,
//! 36 indices, counter-clockwise when seen from outside.

use stickdrive_core::Mesh;
use stickdrive_math::Vec3;
use crate::pipeline::MeshVertex;

/// Indexed triangle mesh ready for upload
#[derive(Clone, Debug)]
pub struct BoxMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

/// (normal, u, v) per face with `u x v == normal`
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
    (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
    (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
];

impl BoxMesh {
    /// A cube of edge length `size` centered on the origin
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in FACES {
            let base = vertices.len() as u16;
            let center = normal * h;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = center + u * (su * h) + v * (sv * h);
                vertices.push(MeshVertex::new(p.to_array(), normal.to_array()));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    /// Geometry for an entity's mesh
    pub fn from_mesh(mesh: &Mesh) -> Self {
        match *mesh {
            Mesh::Cube { size } => Self::cube(size),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
