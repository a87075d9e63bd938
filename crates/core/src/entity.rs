//! Entity module - the unit of lifecycle managed by the pool
//!
//! Every piece of simulation state is an entity: a [`Body`] (one of a closed
//! set of kinds), the ids of the entities it depends on, an optional attached
//! [`Presentation`], and an ordered list of [`ReleaseHook`]s that fire exactly
//! once when the pool releases it.

use std::fmt;

use crate::board::Board;
use crate::budget::{MoveBudget, TimeBudget};
use crate::combo::Combo;
use crate::focus::Focus;
use crate::presentation::Presentation;
use crate::queue::NextQueue;
use crate::record::Record;
use crate::sticker::{MessageSticker, ScoreSticker};
use crate::tile::{Tile, TileSeed};
use crate::types::EntityKind;

/// Pool-unique entity handle. Ids are never reused within a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(u32);

impl EntityId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a per-tick update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Keep,
    Remove,
}

/// Observer invoked once when its entity is released
pub enum ReleaseHook {
    /// Remove the released entity from `owner`'s dependents.
    Unlink(EntityId),
    /// Arbitrary observer; consumed by the call.
    Notify(Box<dyn FnOnce(EntityId)>),
}

impl fmt::Debug for ReleaseHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseHook::Unlink(owner) => f.debug_tuple("Unlink").field(owner).finish(),
            ReleaseHook::Notify(_) => f.write_str("Notify(..)"),
        }
    }
}

/// Closed set of entity payloads
#[derive(Debug, Clone)]
pub enum Body {
    Tile(Tile),
    Seed(TileSeed),
    NextQueue(NextQueue),
    Board(Board),
    Combo(Combo),
    Record(Record),
    Time(TimeBudget),
    Moves(MoveBudget),
    Focus(Focus),
    Message(MessageSticker),
    Score(ScoreSticker),
}

macro_rules! body_accessors {
    ($($variant:ident($ty:ty) => $get:ident, $get_mut:ident;)*) => {
        impl Body {
            $(
                pub fn $get(&self) -> Option<&$ty> {
                    match self {
                        Body::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        Body::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            )*
        }
    };
}

body_accessors! {
    Tile(Tile) => as_tile, as_tile_mut;
    Seed(TileSeed) => as_seed, as_seed_mut;
    NextQueue(NextQueue) => as_next_queue, as_next_queue_mut;
    Board(Board) => as_board, as_board_mut;
    Combo(Combo) => as_combo, as_combo_mut;
    Record(Record) => as_record, as_record_mut;
    Time(TimeBudget) => as_time, as_time_mut;
    Moves(MoveBudget) => as_moves, as_moves_mut;
    Focus(Focus) => as_focus, as_focus_mut;
    Message(MessageSticker) => as_message, as_message_mut;
    Score(ScoreSticker) => as_score, as_score_mut;
}

impl Body {
    pub fn kind(&self) -> EntityKind {
        match self {
            Body::Tile(_) => EntityKind::Tile,
            Body::Seed(_) => EntityKind::Seed,
            Body::NextQueue(_) => EntityKind::NextQueue,
            Body::Board(_) => EntityKind::Board,
            Body::Combo(_) => EntityKind::Combo,
            Body::Record(_) => EntityKind::Record,
            Body::Time(_) => EntityKind::Time,
            Body::Moves(_) => EntityKind::Moves,
            Body::Focus(_) => EntityKind::Focus,
            Body::Message(_) => EntityKind::Message,
            Body::Score(_) => EntityKind::Score,
        }
    }

    /// Advance one tick. `busy` is the attached presentation's answer.
    fn update(&mut self, busy: bool) -> Status {
        match self {
            Body::Tile(tile) => tile.update(busy),
            Body::Seed(seed) => seed.update(),
            Body::Combo(combo) => combo.update(),
            Body::Time(time) => time.update(),
            // Stickers live exactly as long as their presentation plays.
            Body::Message(_) | Body::Score(_) => {
                if busy {
                    Status::Keep
                } else {
                    Status::Remove
                }
            }
            Body::NextQueue(_)
            | Body::Board(_)
            | Body::Record(_)
            | Body::Moves(_)
            | Body::Focus(_) => Status::Keep,
        }
    }

    /// Entities left without an owner when this one is released.
    pub(crate) fn orphans(&self) -> Vec<EntityId> {
        match self {
            Body::NextQueue(queue) => queue.queued().collect(),
            _ => Vec::new(),
        }
    }

    /// Mark an orphaned entity for removal on its next update.
    pub(crate) fn retire(&mut self) {
        if let Body::Seed(seed) = self {
            seed.retire();
        }
    }
}

/// A pooled entity
pub struct Entity {
    id: EntityId,
    pub(crate) dependents: Vec<EntityId>,
    presentation: Option<Box<dyn Presentation>>,
    pub(crate) on_release: Vec<ReleaseHook>,
    body: Body,
}

impl Entity {
    pub(crate) fn new(id: EntityId, body: Body) -> Self {
        Self {
            id,
            dependents: Vec::new(),
            presentation: None,
            on_release: Vec::new(),
            body,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.body.kind()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Entities that must update before this one within a tick
    pub fn dependents(&self) -> &[EntityId] {
        &self.dependents
    }

    pub fn has_presentation(&self) -> bool {
        self.presentation.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.presentation.as_ref().is_some_and(|p| p.is_busy())
    }

    pub(crate) fn attach(&mut self, mut presentation: Box<dyn Presentation>) {
        if let Some(mut previous) = self.presentation.take() {
            previous.detach();
        }
        presentation.attach(self.id, &self.body);
        self.presentation = Some(presentation);
    }

    pub(crate) fn detach(&mut self) {
        if let Some(mut presentation) = self.presentation.take() {
            presentation.detach();
        }
    }

    pub(crate) fn update(&mut self) -> Status {
        let busy = match self.presentation.as_mut() {
            Some(presentation) => {
                presentation.advance_frame(&self.body);
                presentation.is_busy()
            }
            None => false,
        };
        self.body.update(busy)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("dependents", &self.dependents)
            .field("presentation", &self.presentation.is_some())
            .field("on_release", &self.on_release)
            .field("body", &self.body)
            .finish()
    }
}
