//! # EntityStore — Identity-Keyed Component Ownership
//!
//! The store owns all component data. Entities are addressed two ways:
//!
//! - by their stable 64-bit identity (externally generated, never reused),
//!   which is what the scene file records, and
//! - by an opaque generational [`Entity`] handle (index + generation), which
//!   is what in-memory code passes around. Handles are never references, so
//!   destroying an entity can't dangle — a stale handle just stops resolving.
//!
//! Insertion order is preserved and is the order [`EntityStore::iter`] and
//! the scene encoder walk entities in, making serialization deterministic.
//!
//! Components are stored type-erased (`Box<dyn Any + Send + Sync>` keyed by
//! [`TypeId`]) with one instance per type per entity; attaching a second
//! instance of a type overwrites the first.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::error::SceneError;

/// Opaque handle to an entity in an [`EntityStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

struct Record {
    id: u64,
    components: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

struct Slot {
    generation: u32,
    record: Option<Record>,
}

/// Owns a mapping from 64-bit identities to attached component sets.
#[derive(Default)]
pub struct EntityStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Live entities in creation order.
    order: Vec<Entity>,
    by_id: HashMap<u64, Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Creation / Destruction ───────────────────────────────────────

    /// Create an entity with the given stable identity.
    ///
    /// Fails with [`SceneError::DuplicateId`] if the id is already present.
    pub fn create(&mut self, id: u64) -> Result<Entity, SceneError> {
        if self.by_id.contains_key(&id) {
            return Err(SceneError::DuplicateId(id));
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    record: None,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.record = Some(Record {
            id,
            components: HashMap::new(),
        });

        let entity = Entity {
            index,
            generation: slot.generation,
        };
        self.order.push(entity);
        self.by_id.insert(id, entity);
        log::trace!("created entity {id}");
        Ok(entity)
    }

    /// Destroy an entity and drop all its components.
    ///
    /// Returns `true` if the handle was live. Stale handles (already
    /// destroyed, or from a cleared store) are a no-op.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        let Some(slot) = self.slots.get_mut(entity.index as usize) else {
            return false;
        };
        if slot.generation != entity.generation {
            return false;
        }
        let Some(record) = slot.record.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(entity.index);
        self.by_id.remove(&record.id);
        self.order.retain(|&e| e != entity);
        true
    }

    /// Destroy every entity. Handles from before the clear stop resolving.
    pub fn clear(&mut self) {
        for entity in std::mem::take(&mut self.order) {
            self.destroy(entity);
        }
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// Whether the handle resolves to a live entity.
    pub fn contains(&self, entity: Entity) -> bool {
        self.record(entity).is_some()
    }

    /// Whether any live entity has the given identity.
    pub fn contains_id(&self, id: u64) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Handle of the entity with the given identity.
    pub fn find(&self, id: u64) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }

    /// Stable identity of a live entity.
    pub fn id_of(&self, entity: Entity) -> Option<u64> {
        self.record(entity).map(|record| record.id)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live entities in creation order. Finite and restartable.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    // ── Component Access ─────────────────────────────────────────────

    /// Attach a component, overwriting any existing component of the same
    /// type on that entity.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live.
    pub fn attach<T: 'static + Send + Sync>(&mut self, entity: Entity, component: T) {
        self.attach_boxed(entity, Box::new(component));
    }

    /// Attach an already-boxed component. Used by the scene decoder, which
    /// doesn't know the concrete type at compile time.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live.
    pub fn attach_boxed(&mut self, entity: Entity, component: Box<dyn Any + Send + Sync>) {
        let type_id = (*component).type_id();
        let record = self.record_mut(entity).unwrap_or_else(|| {
            panic!("Cannot attach component on dead entity {entity:?}")
        });
        record.components.insert(type_id, component);
    }

    /// Shared reference to a component, or `None` if the entity is dead or
    /// doesn't have one.
    pub fn get<T: 'static + Send + Sync>(&self, entity: Entity) -> Option<&T> {
        self.record(entity)?
            .components
            .get(&TypeId::of::<T>())?
            .downcast_ref::<T>()
    }

    /// Mutable reference to a component.
    pub fn get_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<&mut T> {
        self.record_mut(entity)?
            .components
            .get_mut(&TypeId::of::<T>())?
            .downcast_mut::<T>()
    }

    /// Whether the entity has a component of type `T`.
    pub fn has<T: 'static + Send + Sync>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// Type-erased component lookup by [`TypeId`]. Used by the scene encoder.
    pub fn get_boxed(&self, entity: Entity, type_id: TypeId) -> Option<&dyn Any> {
        let boxed = self.record(entity)?.components.get(&type_id)?;
        Some(boxed.as_ref())
    }

    /// Remove a component from an entity. Returns `true` if it was present.
    pub fn remove<T: 'static + Send + Sync>(&mut self, entity: Entity) -> bool {
        self.remove_by_type_id(entity, TypeId::of::<T>())
    }

    /// Type-erased component removal.
    pub fn remove_by_type_id(&mut self, entity: Entity, type_id: TypeId) -> bool {
        self.record_mut(entity)
            .is_some_and(|record| record.components.remove(&type_id).is_some())
    }

    /// Number of components attached to an entity.
    pub fn component_count(&self, entity: Entity) -> usize {
        self.record(entity)
            .map(|record| record.components.len())
            .unwrap_or(0)
    }

    fn record(&self, entity: Entity) -> Option<&Record> {
        let slot = self.slots.get(entity.index as usize)?;
        if slot.generation != entity.generation {
            return None;
        }
        slot.record.as_ref()
    }

    fn record_mut(&mut self, entity: Entity) -> Option<&mut Record> {
        let slot = self.slots.get_mut(entity.index as usize)?;
        if slot.generation != entity.generation {
            return None;
        }
        slot.record.as_mut()
    }
}
