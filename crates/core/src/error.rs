//! Error values surfaced by the core.
//!
//! Every variant except `InvalidSettings` signals a broken invariant inside a
//! tick. The enclosing application decides whether to restart.

use thiserror::Error;

use crate::entity::EntityId;
use crate::types::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Two live tiles claim the same cell when the board view is rebuilt.
    #[error("overlapping tiles {first} and {second} at ({row}, {col})")]
    OverlapViolation {
        row: i32,
        col: i32,
        first: EntityId,
        second: EntityId,
    },

    /// A full scheduling pass completed no entity.
    #[error("dependency cycle detected among {pending} pending entities")]
    CycleDetected { pending: usize },

    /// An id the game holds no longer resolves to the expected entity.
    #[error("entity {id} is missing or is not a {expected}")]
    MissingEntity { id: EntityId, expected: EntityKind },

    #[error("entity {0} is not in the pool")]
    UnknownEntity(EntityId),

    /// The board needed a new tile but the lookahead queue was empty.
    #[error("next queue exhausted while refilling the board")]
    QueueExhausted,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
