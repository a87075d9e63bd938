//! Combo module - streak counter with a decaying gauge

use log::trace;

use crate::entity::Status;

/// Consecutive-match streak
///
/// The gauge refills to 1.0 on every successful match and drains by a fixed
/// amount per tick while elapsing. A streak is active exactly while the gauge
/// is above zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combo {
    count: u32,
    gauge: f64,
    elapsing: bool,
    decrement: f64,
    bonus_coeff: f64,
}

impl Combo {
    pub fn new(decrement: f64, bonus_coeff: f64) -> Self {
        Self {
            count: 0,
            gauge: 0.0,
            elapsing: false,
            decrement,
            bonus_coeff,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn gauge(&self) -> f64 {
        self.gauge
    }

    pub fn is_active(&self) -> bool {
        self.gauge > 0.0
    }

    pub fn is_elapsing(&self) -> bool {
        self.elapsing
    }

    pub fn set_elapsing(&mut self, elapsing: bool) {
        self.elapsing = elapsing;
    }

    /// Score multiplier on top of the base score
    pub fn bonus(&self) -> f64 {
        f64::from(self.count) * self.bonus_coeff
    }

    /// Register a successful match
    ///
    /// The count only grows when a streak is already running, so the first
    /// match of a streak leaves it unchanged.
    pub fn stack(&mut self) {
        if self.is_active() {
            self.count += 1;
        }
        self.gauge = 1.0;
        trace!("combo stacked: count={}", self.count);
    }

    /// End the streak immediately
    pub fn break_streak(&mut self) {
        if self.count > 0 {
            trace!("combo broken at {}", self.count);
        }
        self.count = 0;
        self.gauge = 0.0;
    }

    pub(crate) fn update(&mut self) -> Status {
        if self.elapsing && self.is_active() {
            self.gauge -= self.decrement;
            if self.gauge <= 0.0 {
                self.break_streak();
            }
        }
        Status::Keep
    }
}
