//! World module - the explicit context threaded through every operation
//!
//! Holds the entity pool, the active settings, the seeded RNG and the
//! presentation factory table. Nothing in the core reaches for global state.

use crate::entity::{Body, EntityId};
use crate::pool::Pool;
use crate::presentation::PresentationTable;
use crate::rng::SimpleRng;
use crate::settings::Settings;

#[derive(Debug)]
pub struct World {
    pub(crate) settings: Settings,
    pub(crate) pool: Pool,
    pub(crate) rng: SimpleRng,
    presentations: PresentationTable,
}

impl World {
    pub fn new(settings: Settings, presentations: PresentationTable) -> Self {
        let rng = SimpleRng::new(settings.seed);
        Self {
            settings,
            pool: Pool::new(),
            rng,
            presentations,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut Pool {
        &mut self.pool
    }

    pub fn rng_mut(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }

    pub fn presentations(&self) -> &PresentationTable {
        &self.presentations
    }

    /// Pool a new entity and attach its presentation, if the table has one
    pub fn spawn(&mut self, body: Body) -> EntityId {
        self.spawn_with(|_| body)
    }

    pub fn spawn_with(&mut self, make: impl FnOnce(EntityId) -> Body) -> EntityId {
        let presentations = &self.presentations;
        self.pool.add_presented(make, |kind| presentations.make(kind))
    }

    /// Drain the pool and restart the RNG for a new game
    pub(crate) fn restart(&mut self, settings: Settings) {
        self.pool.reset();
        self.rng = SimpleRng::new(settings.seed);
        self.settings = settings;
    }
}
