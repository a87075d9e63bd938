//! Presentation capability - the narrow seam to an external renderer
//!
//! The core never interprets what a presentation does. It attaches one when an
//! entity is created, advances it once per tick before the entity updates,
//! detaches it on release, and reads `is_busy()` as the only feedback: a busy
//! tile holds its state transition, a busy sticker stays in the pool.

use std::collections::BTreeMap;
use std::fmt;

use crate::entity::{Body, EntityId};
use crate::types::EntityKind;

pub trait Presentation {
    /// Bind to a freshly pooled entity.
    fn attach(&mut self, id: EntityId, body: &Body);

    /// Unbind; called exactly once when the entity is released.
    fn detach(&mut self);

    /// Advance one frame given the entity's current state.
    fn advance_frame(&mut self, body: &Body);

    fn is_busy(&self) -> bool {
        false
    }
}

type Factory = Box<dyn Fn() -> Box<dyn Presentation>>;

/// Factory table mapping entity kinds to presentation constructors
///
/// Supplied by the caller when a game is created. Kinds without an entry run
/// headless.
#[derive(Default)]
pub struct PresentationTable {
    factories: BTreeMap<EntityKind, Factory>,
}

impl PresentationTable {
    /// A table without factories: every entity runs headless
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, kind: EntityKind, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Presentation> + 'static,
    {
        self.insert(kind, factory);
        self
    }

    pub fn insert<F>(&mut self, kind: EntityKind, factory: F)
    where
        F: Fn() -> Box<dyn Presentation> + 'static,
    {
        self.factories.insert(kind, Box::new(factory));
    }

    pub fn make(&self, kind: EntityKind) -> Option<Box<dyn Presentation>> {
        self.factories.get(&kind).map(|factory| factory())
    }
}

impl fmt::Debug for PresentationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
