//! Budget module - the countdown resource that ends a game
//!
//! Exactly one budget is live per game: a continuous timer in time-attack
//! mode or a move counter in classic mode.

use crate::entity::Status;

/// Fraction of the time limit left, in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeBudget {
    remain: f64,
    decrement: f64,
    elapsing: bool,
}

impl TimeBudget {
    /// Full budget, frozen until the orchestrator starts it
    pub fn new(decrement: f64) -> Self {
        Self {
            remain: 1.0,
            decrement,
            elapsing: false,
        }
    }

    pub fn remain(&self) -> f64 {
        self.remain
    }

    pub fn is_elapsing(&self) -> bool {
        self.elapsing
    }

    pub fn set_elapsing(&mut self, elapsing: bool) {
        self.elapsing = elapsing;
    }

    pub fn is_exhausted(&self) -> bool {
        self.remain <= 0.0
    }

    pub(crate) fn update(&mut self) -> Status {
        if self.elapsing {
            self.remain = (self.remain - self.decrement).max(0.0);
        }
        Status::Keep
    }
}

/// Player actions left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveBudget {
    remain: u32,
}

impl MoveBudget {
    pub fn new(limit: u32) -> Self {
        Self { remain: limit }
    }

    pub fn remain(&self) -> u32 {
        self.remain
    }

    pub fn consume(&mut self) {
        self.remain = self.remain.saturating_sub(1);
    }

    pub fn is_exhausted(&self) -> bool {
        self.remain == 0
    }
}
