//! Entity and Material types
//!
//! An Entity is an object in the scene with a transform and, if it is drawn,
//! a mesh and material. The camera is an entity without geometry.

use serde::{Serialize, Deserialize};
use crate::Transform;

/// How a mesh is colored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Base color with simple directional lighting
    #[default]
    Lit,
    /// Surface normals mapped to RGB (debug visualization)
    Normals,
}

/// A simple material with a base color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
    pub shading: Shading,
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// Create a new material with the given RGBA color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
            shading: Shading::Lit,
        }
    }

    /// Create a new opaque material with the given RGB color
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Builder: set shading mode
    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    /// White material
    pub const WHITE: Self = Self { base_color: [1.0, 1.0, 1.0, 1.0], shading: Shading::Lit };

    /// Blue material
    pub const BLUE: Self = Self { base_color: [0.0, 0.478, 1.0, 1.0], shading: Shading::Lit };
}

/// Geometry attached to an entity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mesh {
    /// Axis-aligned box centered on the origin with the given edge length
    Cube { size: f32 },
}

/// An object in the scene
#[derive(Clone, Debug)]
pub struct Entity {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    /// The entity's transform in world space
    pub transform: Transform,
    /// Geometry, `None` for non-renderable entities such as the camera
    pub mesh: Option<Mesh>,
    /// The entity's material
    pub material: Material,
}

impl Entity {
    /// Create a renderable entity
    pub fn new(mesh: Mesh) -> Self {
        Self {
            name: None,
            transform: Transform::identity(),
            mesh: Some(mesh),
            material: Material::default(),
        }
    }

    /// Create an entity with no geometry
    pub fn empty() -> Self {
        Self {
            name: None,
            transform: Transform::identity(),
            mesh: None,
            material: Material::default(),
        }
    }

    /// Builder: set name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: set material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Whether this entity has geometry to draw
    pub fn is_renderable(&self) -> bool {
        self.mesh.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickdrive_math::Vec3;

    #[test]
    fn test_entity_builder() {
        let entity = Entity::new(Mesh::Cube { size: 0.35 })
            .with_name("cube")
            .with_transform(Transform::from_position(Vec3::new(0.0, 1.0, 0.0)))
            .with_material(Material::BLUE.with_shading(Shading::Normals));

        assert_eq!(entity.name.as_deref(), Some("cube"));
        assert_eq!(entity.transform.position.y, 1.0);
        assert_eq!(entity.material.shading, Shading::Normals);
        assert!(entity.is_renderable());
    }

    #[test]
    fn test_empty_entity_not_renderable() {
        assert!(!Entity::empty().is_renderable());
    }
}
