//! Pool module - owns every entity and advances them once per tick
//!
//! A tick is a single-threaded topological pass: entities are scanned in
//! insertion order, and one whose dependents have not all been updated yet is
//! requeued behind the rest. Entities that report [`Status::Remove`] are
//! released only after the whole pass, so release hooks never observe a
//! half-updated pool.

use std::collections::{BTreeMap, HashSet, VecDeque};

use log::trace;

use crate::board::Board;
use crate::budget::{MoveBudget, TimeBudget};
use crate::combo::Combo;
use crate::entity::{Body, Entity, EntityId, ReleaseHook, Status};
use crate::error::{CoreError, Result};
use crate::focus::Focus;
use crate::presentation::Presentation;
use crate::queue::NextQueue;
use crate::record::Record;
use crate::tile::{Tile, TileSeed};
use crate::types::EntityKind;

macro_rules! typed_lookups {
    ($($kind:ident: $ty:ty => $get:ident / $as:ident, $get_mut:ident / $as_mut:ident;)*) => {
        $(
            pub fn $get(&self, id: EntityId) -> Result<&$ty> {
                self.body(id)
                    .and_then(Body::$as)
                    .ok_or(CoreError::MissingEntity {
                        id,
                        expected: EntityKind::$kind,
                    })
            }

            pub fn $get_mut(&mut self, id: EntityId) -> Result<&mut $ty> {
                self.body_mut(id)
                    .and_then(Body::$as_mut)
                    .ok_or(CoreError::MissingEntity {
                        id,
                        expected: EntityKind::$kind,
                    })
            }
        )*
    };
}

/// Entity pool
///
/// Ids grow monotonically, so iterating the map visits entities in insertion
/// order.
#[derive(Debug, Default)]
pub struct Pool {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u32,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.entities.get(&id).map(Entity::body)
    }

    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.entities.get_mut(&id).map(Entity::body_mut)
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Dependents of `id`, empty when `id` is not pooled
    pub fn dependents(&self, id: EntityId) -> &[EntityId] {
        self.entities
            .get(&id)
            .map(Entity::dependents)
            .unwrap_or(&[])
    }

    pub fn any_of_kind(&self, kind: EntityKind) -> bool {
        self.entities.values().any(|entity| entity.kind() == kind)
    }

    pub fn count_of_kind(&self, kind: EntityKind) -> usize {
        self.entities
            .values()
            .filter(|entity| entity.kind() == kind)
            .count()
    }

    typed_lookups! {
        Tile: Tile => tile / as_tile, tile_mut / as_tile_mut;
        Seed: TileSeed => seed / as_seed, seed_mut / as_seed_mut;
        NextQueue: NextQueue => next_queue / as_next_queue, next_queue_mut / as_next_queue_mut;
        Board: Board => board / as_board, board_mut / as_board_mut;
        Combo: Combo => combo / as_combo, combo_mut / as_combo_mut;
        Record: Record => record / as_record, record_mut / as_record_mut;
        Time: TimeBudget => time / as_time, time_mut / as_time_mut;
        Moves: MoveBudget => moves / as_moves, moves_mut / as_moves_mut;
        Focus: Focus => focus / as_focus, focus_mut / as_focus_mut;
    }

    /// Add an entity and return its id
    pub fn add(&mut self, body: Body) -> EntityId {
        self.add_with(|_| body)
    }

    /// Add an entity whose body needs to know its own id
    pub fn add_with(&mut self, make: impl FnOnce(EntityId) -> Body) -> EntityId {
        self.add_presented(make, |_| None)
    }

    /// Add an entity with whatever presentation `present` makes for its kind
    ///
    /// The presentation is attached before the entity enters the pool.
    pub fn add_presented(
        &mut self,
        make: impl FnOnce(EntityId) -> Body,
        present: impl FnOnce(EntityKind) -> Option<Box<dyn Presentation>>,
    ) -> EntityId {
        let id = EntityId::from_raw(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let mut entity = Entity::new(id, make(id));
        if let Some(presentation) = present(entity.kind()) {
            entity.attach(presentation);
        }
        trace!("pool add {} {}", entity.kind(), id);
        self.entities.insert(id, entity);
        id
    }

    /// Make `owner` update after `dependency` every tick.
    ///
    /// When `dependency` is released it drops out of `owner`'s dependents.
    pub fn depend(&mut self, owner: EntityId, dependency: EntityId) -> Result<()> {
        if !self.entities.contains_key(&owner) {
            return Err(CoreError::UnknownEntity(owner));
        }
        let dep = self
            .entities
            .get_mut(&dependency)
            .ok_or(CoreError::UnknownEntity(dependency))?;
        dep.on_release.push(ReleaseHook::Unlink(owner));
        if let Some(entity) = self.entities.get_mut(&owner) {
            entity.dependents.push(dependency);
        }
        Ok(())
    }

    /// Register an observer fired once when `id` is released
    pub fn on_release(
        &mut self,
        id: EntityId,
        observer: impl FnOnce(EntityId) + 'static,
    ) -> Result<()> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(CoreError::UnknownEntity(id))?;
        entity.on_release.push(ReleaseHook::Notify(Box::new(observer)));
        Ok(())
    }

    /// Run one dependency-ordered pass over every entity
    ///
    /// Fails with [`CoreError::CycleDetected`] when a full sweep over the
    /// pending entities completes none of them.
    pub fn tick(&mut self) -> Result<()> {
        let mut todo: VecDeque<EntityId> = self.entities.keys().copied().collect();
        let mut done: HashSet<EntityId> = HashSet::with_capacity(todo.len());
        let mut dead = Vec::new();
        let mut stalled = 0usize;

        while let Some(id) = todo.pop_front() {
            let Some(entity) = self.entities.get(&id) else {
                continue;
            };

            let ready = entity
                .dependents
                .iter()
                .all(|dep| done.contains(dep) || !self.entities.contains_key(dep));
            if !ready {
                todo.push_back(id);
                stalled += 1;
                if stalled >= todo.len() {
                    return Err(CoreError::CycleDetected {
                        pending: todo.len(),
                    });
                }
                continue;
            }
            stalled = 0;

            if let Some(entity) = self.entities.get_mut(&id) {
                if entity.update() == Status::Remove {
                    dead.push(id);
                }
            }
            done.insert(id);
        }

        trace!(
            "pool pass: {} updated, {} released",
            done.len(),
            dead.len()
        );
        for id in dead {
            self.release(id);
        }
        Ok(())
    }

    /// Remove an entity and fire its release hooks
    ///
    /// Returns false if the entity was already gone; hooks never fire twice.
    pub fn release(&mut self, id: EntityId) -> bool {
        let Some(mut entity) = self.entities.remove(&id) else {
            return false;
        };
        entity.detach();

        for hook in std::mem::take(&mut entity.on_release) {
            match hook {
                ReleaseHook::Unlink(owner) => {
                    if let Some(owner) = self.entities.get_mut(&owner) {
                        owner.dependents.retain(|dep| *dep != id);
                    }
                }
                ReleaseHook::Notify(observer) => observer(id),
            }
        }

        for orphan in entity.body().orphans() {
            if let Some(body) = self.body_mut(orphan) {
                body.retire();
            }
        }

        trace!("pool release {} {}", entity.kind(), id);
        true
    }

    /// Release every entity, draining until the pool is empty
    pub fn reset(&mut self) {
        while let Some(id) = self.entities.keys().next().copied() {
            self.release(id);
        }
    }
}
