//! Record module - score and play counters

use crate::board::BustGroup;

/// Score for busting `matched` tiles under a combo `bonus`
///
/// `matched² · score_base`, plus the bonus fraction of that base. Only the
/// bonus term is truncated.
pub fn calculate_bust_score(matched: usize, score_base: u32, bonus: f64) -> u64 {
    let matched = matched as u64;
    let base = matched * matched * u64::from(score_base);
    base + (base as f64 * bonus) as u64
}

/// Monotonic counters for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    score: u64,
    bust_count: u32,
    move_count: u32,
    max_combo: u32,
    score_base: u32,
}

impl Record {
    pub fn new(score_base: u32) -> Self {
        Self {
            score_base,
            ..Self::default()
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn bust_count(&self) -> u32 {
        self.bust_count
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn score_base(&self) -> u32 {
        self.score_base
    }

    /// Add the score for one bust group; returns the score gained
    ///
    /// Only the matched normals drive the score, but every destroyed tile
    /// counts toward `bust_count`.
    pub fn add_bust_score(&mut self, group: &BustGroup, bonus: f64) -> u64 {
        let delta = calculate_bust_score(group.normals.len(), self.score_base, bonus);
        self.score += delta;
        self.bust_count += group.len() as u32;
        delta
    }

    pub fn add_move(&mut self) {
        self.move_count += 1;
    }

    pub fn update_max_combo(&mut self, combo: u32) {
        self.max_combo = self.max_combo.max(combo);
    }
}
