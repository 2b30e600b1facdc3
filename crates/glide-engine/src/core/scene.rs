use std::collections::HashSet;

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage: a flat Vec for small-to-medium entity counts, plus a
/// pending-removal set so game code can mark entities dead while iterating
/// and have them swept at the end of the frame.
pub struct Scene {
    entities: Vec<Entity>,
    pending_removal: HashSet<EntityId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            pending_removal: HashSet::new(),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity immediately. Returns the removed entity if found.
    /// Not safe to call while iterating; prefer [`Scene::queue_despawn`].
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.pending_removal.remove(&id);
        self.entities
            .iter()
            .position(|e| e.id == id)
            .map(|idx| self.entities.swap_remove(idx))
    }

    /// Mark an entity for removal at the next [`Scene::sweep`].
    /// Marking an unknown or already-marked ID is a no-op.
    pub fn queue_despawn(&mut self, id: EntityId) {
        self.pending_removal.insert(id);
    }

    /// Whether an entity is marked for removal.
    pub fn is_despawning(&self, id: EntityId) -> bool {
        self.pending_removal.contains(&id)
    }

    /// Remove every entity marked since the last sweep.
    /// Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        if self.pending_removal.is_empty() {
            return 0;
        }
        let before = self.entities.len();
        let pending = std::mem::take(&mut self.pending_removal);
        self.entities.retain(|e| !pending.contains(&e.id));
        before - self.entities.len()
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find the first entity with the given tag (mutable).
    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// All entity IDs with the given tag. IDs rather than references, so the
    /// caller can mutate or queue despawns while walking the result.
    pub fn ids_by_tag(&self, tag: &str) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.id)
            .collect()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities and pending removals.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_removal.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
