use gravity_engine::{EntityId, PhysicsWorld};

use crate::entity::Entity;

/// Active entities, stored in a flat Vec in spawn order.
/// Designed for small entity counts (tens, not thousands).
///
/// Removal is deferred: `mark_for_removal` only queues an id, and
/// `sweep_removed` destroys the bodies between physics steps.
#[derive(Debug)]
pub struct Scene {
    entities: Vec<Entity>,
    pending_removal: Vec<EntityId>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
            pending_removal: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh entity id.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The id `next_id` will hand out.
    pub fn peek_next_id(&self) -> EntityId {
        EntityId(self.next_id)
    }

    /// Never hand out ids below `next` (snapshot restore).
    pub fn reserve_ids_below(&mut self, next: EntityId) {
        self.next_id = self.next_id.max(next.0);
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.next_id = self.next_id.max(entity.id.0.saturating_add(1));
        self.entities.push(entity);
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

    /// The sun, if present.
    pub fn sun(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind.is_sun())
    }

    pub fn planets(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_planet())
    }

    pub fn planet_count(&self) -> usize {
        self.planets().count()
    }

    /// Queue an entity for destruction at the end of the substep.
    /// Returns false if it was already queued.
    pub fn mark_for_removal(&mut self, id: EntityId) -> bool {
        if self.pending_removal.contains(&id) {
            return false;
        }
        self.pending_removal.push(id);
        true
    }

    pub fn is_marked(&self, id: EntityId) -> bool {
        self.pending_removal.contains(&id)
    }

    /// Destroy all queued entities and their bodies in one pass.
    /// Survivors keep their relative order. Returns the removed entities.
    pub fn sweep_removed(&mut self, physics: &mut PhysicsWorld) -> Vec<Entity> {
        if self.pending_removal.is_empty() {
            return Vec::new();
        }

        let pending = std::mem::take(&mut self.pending_removal);
        let (removed, kept): (Vec<Entity>, Vec<Entity>) = std::mem::take(&mut self.entities)
            .into_iter()
            .partition(|e| pending.contains(&e.id));
        self.entities = kept;

        for entity in &removed {
            physics.remove_body(&entity.body);
        }
        removed
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity without touching physics (the world is rebuilt separately).
    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_removal.clear();
        self.next_id = 1;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
