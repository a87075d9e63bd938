//! Settings module - every tunable of a game, fixed at initialization
//!
//! Plain numeric fields only; loading them from a file is the caller's
//! business (enable the `serde` feature to derive the impls).

use crate::error::{CoreError, Result};
use crate::focus::Focus;
use crate::queue::SeedRules;
use crate::types::{
    GameMode, DEFAULT_BLOCK_COLORS, DEFAULT_BOARD_SIZE, DEFAULT_BUST_THRESHOLD,
    DEFAULT_COMBO_BONUS_COEFF, DEFAULT_COMBO_TIME_LIMIT, DEFAULT_FPS, DEFAULT_MOVE_LIMIT,
    DEFAULT_SCORE_BASE, DEFAULT_SPECIAL_FREQ, DEFAULT_TIME_LIMIT, DEFAULT_TOUGHNESS_MAX,
    DEFAULT_TOUGH_FREQ,
};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Ticks per second; converts the second-based limits into per-tick rates
    pub fps: u32,
    pub mode: GameMode,
    pub rows: u8,
    pub cols: u8,
    pub focus_row: i32,
    pub focus_col: i32,
    /// Inclusive: the mask covers `focus_row..=focus_row + focus_row_span`
    pub focus_row_span: i32,
    pub focus_col_span: i32,
    pub block_colors: u8,
    /// Percent chance of a special tile
    pub special_freq: u8,
    /// Percent chance of a tough normal tile
    pub tough_freq: u8,
    pub toughness_max: u8,
    pub bust_threshold: usize,
    pub score_base: u32,
    pub combo_bonus_coeff: f64,
    /// Seconds a full combo gauge lasts
    pub combo_time_limit: f64,
    /// Seconds in a time-attack game
    pub time_limit: f64,
    /// Moves in a classic game
    pub move_limit: u32,
    pub seed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            mode: GameMode::Classic,
            rows: DEFAULT_BOARD_SIZE,
            cols: DEFAULT_BOARD_SIZE,
            focus_row: 0,
            focus_col: 0,
            focus_row_span: i32::from(DEFAULT_BOARD_SIZE),
            focus_col_span: i32::from(DEFAULT_BOARD_SIZE),
            block_colors: DEFAULT_BLOCK_COLORS,
            special_freq: DEFAULT_SPECIAL_FREQ,
            tough_freq: DEFAULT_TOUGH_FREQ,
            toughness_max: DEFAULT_TOUGHNESS_MAX,
            bust_threshold: DEFAULT_BUST_THRESHOLD,
            score_base: DEFAULT_SCORE_BASE,
            combo_bonus_coeff: DEFAULT_COMBO_BONUS_COEFF,
            combo_time_limit: DEFAULT_COMBO_TIME_LIMIT,
            time_limit: DEFAULT_TIME_LIMIT,
            move_limit: DEFAULT_MOVE_LIMIT,
            seed: 1,
        }
    }
}

impl Settings {
    /// Board of `rows x cols` with the focus reset to cover all of it
    pub fn with_board(mut self, rows: u8, cols: u8) -> Self {
        self.rows = rows;
        self.cols = cols;
        self.focus_row = 0;
        self.focus_col = 0;
        self.focus_row_span = i32::from(rows);
        self.focus_col_span = i32::from(cols);
        self
    }

    pub fn with_focus(mut self, row: i32, col: i32, row_span: i32, col_span: i32) -> Self {
        self.focus_row = row;
        self.focus_col = col;
        self.focus_row_span = row_span;
        self.focus_col_span = col_span;
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_colors(mut self, block_colors: u8) -> Self {
        self.block_colors = block_colors;
        self
    }

    pub fn with_frequencies(mut self, special_freq: u8, tough_freq: u8) -> Self {
        self.special_freq = special_freq;
        self.tough_freq = tough_freq;
        self
    }

    pub fn with_toughness_max(mut self, toughness_max: u8) -> Self {
        self.toughness_max = toughness_max;
        self
    }

    pub fn with_bust_threshold(mut self, bust_threshold: usize) -> Self {
        self.bust_threshold = bust_threshold;
        self
    }

    pub fn with_score(mut self, score_base: u32, combo_bonus_coeff: f64) -> Self {
        self.score_base = score_base;
        self.combo_bonus_coeff = combo_bonus_coeff;
        self
    }

    pub fn with_combo_time_limit(mut self, seconds: f64) -> Self {
        self.combo_time_limit = seconds;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_move_limit(mut self, moves: u32) -> Self {
        self.move_limit = moves;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn focus(&self) -> Focus {
        Focus::new(
            self.focus_row,
            self.focus_col,
            self.focus_row_span,
            self.focus_col_span,
        )
    }

    /// Combo gauge drained per tick
    pub fn combo_decrement(&self) -> f64 {
        1.0 / f64::from(self.fps) / self.combo_time_limit
    }

    /// Time budget drained per tick
    pub fn time_decrement(&self) -> f64 {
        1.0 / f64::from(self.fps) / self.time_limit
    }

    /// Next queue lookahead, one full board worth of tiles
    pub fn queue_capacity(&self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    pub fn seed_rules(&self) -> SeedRules {
        SeedRules {
            block_colors: self.block_colors,
            special_freq: self.special_freq,
            tough_freq: self.tough_freq,
            toughness_max: self.toughness_max,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(CoreError::InvalidSettings(msg));

        if self.fps == 0 {
            return fail("fps must be positive".into());
        }
        if self.rows == 0 || self.cols == 0 {
            return fail(format!("board {}x{} is empty", self.rows, self.cols));
        }
        if self.block_colors == 0 {
            return fail("block_colors must be positive".into());
        }
        if self.special_freq > 100 || self.tough_freq > 100 {
            return fail(format!(
                "frequencies must be percentages, got special={} tough={}",
                self.special_freq, self.tough_freq
            ));
        }
        if self.toughness_max == 0 {
            return fail("toughness_max must be positive".into());
        }
        if self.bust_threshold == 0 {
            return fail("bust_threshold must be positive".into());
        }
        if !(self.combo_time_limit > 0.0) {
            return fail(format!(
                "combo_time_limit must be positive, got {}",
                self.combo_time_limit
            ));
        }
        if self.mode.has_time_budget() && !(self.time_limit > 0.0) {
            return fail(format!("time_limit must be positive, got {}", self.time_limit));
        }
        if !self.mode.has_time_budget() && self.move_limit == 0 {
            return fail("move_limit must be positive".into());
        }
        let (rows, cols) = (i32::from(self.rows), i32::from(self.cols));
        if !(0..rows).contains(&self.focus_row) || !(0..cols).contains(&self.focus_col) {
            return fail(format!(
                "focus origin ({}, {}) is outside the {}x{} board",
                self.focus_row, self.focus_col, rows, cols
            ));
        }
        if self.focus_row_span < 0 || self.focus_col_span < 0 {
            return fail("focus spans must not be negative".into());
        }
        Ok(())
    }
}
