//! World container for entities
//!
//! Entities live in a slotmap, so an [`EntityKey`] goes stale instead of
//! aliasing a different entity once its entity is removed.

use slotmap::{new_key_type, SlotMap};
use crate::Entity;

new_key_type! {
    /// Generational key to an entity in the world
    pub struct EntityKey;
}

/// The scene containing all entities
#[derive(Default)]
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
        }
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Add an entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Remove an entity, returning it if the key was live
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        self.entities.remove(key)
    }

    /// Get a reference to an entity by key
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities from the world
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Iterate over keys and entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Iterate over entities that have geometry
    pub fn renderables(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter().filter(|(_, e)| e.is_renderable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mesh;

    #[test]
    fn test_world_new() {
        let world = World::new();
        assert!(world.is_empty());
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_add_and_get() {
        let mut world = World::new();
        let key = world.add_entity(Entity::new(Mesh::Cube { size: 1.0 }).with_name("cube"));
        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.get_entity(key).unwrap().name.as_deref(), Some("cube"));
    }

    #[test]
    fn test_removed_key_is_stale() {
        let mut world = World::new();
        let key = world.add_entity(Entity::empty());
        world.remove_entity(key);
        let other = world.add_entity(Entity::empty().with_name("other"));

        assert!(world.get_entity(key).is_none());
        assert!(world.get_entity(other).is_some());
    }

    #[test]
    fn test_get_by_name() {
        let mut world = World::new();
        world.add_entity(Entity::empty().with_name("camera"));
        let cube = world.add_entity(Entity::new(Mesh::Cube { size: 1.0 }).with_name("cube"));

        let (key, _) = world.get_by_name("cube").unwrap();
        assert_eq!(key, cube);
        assert!(world.get_by_name("missing").is_none());
    }

    #[test]
    fn test_renderables_skip_camera() {
        let mut world = World::new();
        world.add_entity(Entity::empty());
        world.add_entity(Entity::new(Mesh::Cube { size: 1.0 }));
        assert_eq!(world.renderables().count(), 1);
    }
}
