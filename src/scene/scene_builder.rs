//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the demo scene: one driven object and
//! the camera entity that orbits it.

use stickdrive_core::{Entity, EntityKey, Material, Mesh, Shading, Transform, Vec3, World};

/// Edge length of the default cube
pub const DEFAULT_CUBE_SIZE: f32 = 0.35;

/// Keys of the entities the simulation drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    pub object: Option<EntityKey>,
    pub camera: Option<EntityKey>,
}

/// Builder for the demo scene
///
/// # Example
/// ```ignore
/// let (world, handles) = SceneBuilder::new()
///     .add_cube(0.35, Material::BLUE.with_shading(Shading::Normals))
///     .add_camera()
///     .build();
/// ```
pub struct SceneBuilder {
    world: World,
    object: Option<EntityKey>,
    camera: Option<EntityKey>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            world: World::with_capacity(2),
            object: None,
            camera: None,
        }
    }

    /// Add the driven cube at the origin
    ///
    /// A second call replaces which entity is driven; the first stays in
    /// the world.
    pub fn add_cube(mut self, size: f32, material: Material) -> Self {
        let key = self.world.add_entity(
            Entity::new(Mesh::Cube { size })
                .with_name("cube")
                .with_material(material),
        );
        self.object = Some(key);
        self
    }

    /// Add the camera entity, initially on +Z at unit distance
    pub fn add_camera(mut self) -> Self {
        let mut transform = Transform::identity();
        transform.look_at(Vec3::Z, Vec3::ZERO, Vec3::Y);
        let key = self
            .world
            .add_entity(Entity::empty().with_name("camera").with_transform(transform));
        self.camera = Some(key);
        self
    }

    /// Finish building
    pub fn build(self) -> (World, SceneHandles) {
        log::info!("Built scene with {} entities", self.world.entity_count());
        (
            self.world,
            SceneHandles {
                object: self.object,
                camera: self.camera,
            },
        )
    }

    /// The default scene: a normal-shaded blue cube and the orbit camera
    pub fn demo_scene() -> (World, SceneHandles) {
        Self::new()
            .add_cube(DEFAULT_CUBE_SIZE, Material::BLUE.with_shading(Shading::Normals))
            .add_camera()
            .build()
    }
}
