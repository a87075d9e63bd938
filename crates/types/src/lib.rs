//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no mandatory dependencies, so they can be used
//! by the simulation core, a presentation layer, or any outer shell alike.
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` on them.
//!
//! # Coordinates
//!
//! Tiles live on a `rows x cols` grid addressed as `(row, col)`:
//!
//! - **Row 0** is the top edge, **col 0** the left edge
//! - Coordinates are `i32` because freshly spawned tiles start just outside
//!   the visible extent (row `-1`, col `cols`, ...) before moving in
//!
//! # Default Tuning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 60 | Ticks per second assumed by rate conversions |
//! | `DEFAULT_BOARD_SIZE` | 4 | Rows and columns of the default board |
//! | `DEFAULT_BLOCK_COLORS` | 4 | Number of normal tile colors |
//! | `DEFAULT_BUST_THRESHOLD` | 3 | Minimum group size that busts |
//! | `DEFAULT_SCORE_BASE` | 100 | Score per matched tile squared |
//! | `DEFAULT_COMBO_BONUS_COEFF` | 0.2 | Bonus fraction added per combo step |
//! | `DEFAULT_COMBO_TIME_LIMIT` | 1.5 | Seconds before a combo gauge empties |
//! | `DEFAULT_TIME_LIMIT` | 60 | Seconds of play in time attack |
//! | `DEFAULT_MOVE_LIMIT` | 30 | Moves of play in classic mode |
//!
//! # Examples
//!
//! ```
//! use tile_bust_types::{Command, Direction, Phase};
//!
//! let command = Command::from_str("left").unwrap();
//! assert_eq!(command.direction(), Some(Direction::Left));
//! assert_eq!(Command::Shuffle.direction(), None);
//!
//! assert!(Phase::GameOver.is_terminal());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ticks per second assumed when converting seconds into per-tick decrements
pub const DEFAULT_FPS: u32 = 60;

/// Rows and columns of the default (square) board
pub const DEFAULT_BOARD_SIZE: u8 = 4;

/// Number of normal tile colors
pub const DEFAULT_BLOCK_COLORS: u8 = 4;

/// Percentage of generated tiles that are special
pub const DEFAULT_SPECIAL_FREQ: u8 = 0;

/// Percentage of normal tiles generated with extra toughness
pub const DEFAULT_TOUGH_FREQ: u8 = 0;

/// Upper bound of randomly rolled toughness
pub const DEFAULT_TOUGHNESS_MAX: u8 = 3;

/// Minimum connected group size that busts
pub const DEFAULT_BUST_THRESHOLD: usize = 3;

/// Score base multiplied by the squared group size
pub const DEFAULT_SCORE_BASE: u32 = 100;

/// Bonus fraction added per combo step
pub const DEFAULT_COMBO_BONUS_COEFF: f64 = 0.2;

/// Seconds a full combo gauge takes to empty
pub const DEFAULT_COMBO_TIME_LIMIT: f64 = 1.5;

/// Seconds of play in time attack
pub const DEFAULT_TIME_LIMIT: f64 = 60.0;

/// Moves of play in classic mode
pub const DEFAULT_MOVE_LIMIT: u32 = 30;

/// Messages shown one after another before a time attack starts
pub const INTRO_MESSAGES: [&str; 5] = ["Ready", "3", "2", "1", "Go!"];

/// Terminal message when the move budget runs out
pub const OUT_OF_MOVES_MESSAGE: &str = "Out of Moves";

/// Terminal message when the time budget runs out
pub const TIME_OVER_MESSAGE: &str = "Time Over";

/// Slide directions
///
/// A slide compacts every lane toward the named edge:
/// **Up** pulls tiles toward row 0, **Left** toward col 0, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Whether lanes are columns (vertical slide) rather than rows
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Abstract player commands
///
/// Only these commands cross the boundary between an input device and the
/// core. A command is consumed once per `Ready` evaluation, then cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
    Shuffle,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_bust_types::Command;
    ///
    /// assert_eq!(Command::from_str("Up"), Some(Command::Up));
    /// assert_eq!(Command::from_str("shuffle"), Some(Command::Shuffle));
    /// assert_eq!(Command::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Command::None),
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "up" => Some(Command::Up),
            "down" => Some(Command::Down),
            "shuffle" => Some(Command::Shuffle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::None => "none",
            Command::Left => "left",
            Command::Right => "right",
            Command::Up => "up",
            Command::Down => "down",
            Command::Shuffle => "shuffle",
        }
    }

    /// Slide direction carried by this command, if any
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::None | Command::Shuffle => None,
        }
    }
}

impl From<Direction> for Command {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => Command::Up,
            Direction::Down => Command::Down,
            Direction::Left => Command::Left,
            Direction::Right => Command::Right,
        }
    }
}

/// Tile kinds
///
/// - **Normal**: colored, joins same-color groups
/// - **Special**: colorless, only destroyed when orthogonally adjacent to a
///   busting normal group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TileKind {
    Normal,
    Special,
}

/// Tile lifecycle
///
/// `Idle → Moved → Idle`, `Idle → Busted → Idle` (toughness left) or
/// `Busted → Dead` (toughness exhausted). Dead tiles leave the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TileState {
    #[default]
    Idle,
    Moved,
    Busted,
    Dead,
}

impl TileState {
    pub fn is_settled(&self) -> bool {
        matches!(self, TileState::Idle)
    }
}

/// Game modes, each with exactly one budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameMode {
    /// Discrete move budget
    #[default]
    Classic,
    /// Continuous time budget with an intro countdown
    TimeAttack,
}

impl GameMode {
    pub fn has_time_budget(&self) -> bool {
        matches!(self, GameMode::TimeAttack)
    }
}

/// Orchestrator phases
///
/// `CountDown → NextCycle → Ready ⇄ {BlockSlide, BlockShuffle} → BlockBust →
/// NextCycle → Ready`, and `Ready → GameOver` once the budget is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    CountDown,
    Ready,
    BlockSlide,
    BlockShuffle,
    BlockBust,
    NextCycle,
    GameOver,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::CountDown => "countDown",
            Phase::Ready => "ready",
            Phase::BlockSlide => "blockSlide",
            Phase::BlockShuffle => "blockShuffle",
            Phase::BlockBust => "blockBust",
            Phase::NextCycle => "nextCycle",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Closed set of entity kinds living in the pool
///
/// Used as the key of the presentation factory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityKind {
    Tile,
    Seed,
    NextQueue,
    Board,
    Combo,
    Record,
    Time,
    Moves,
    Focus,
    Message,
    Score,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Tile => "tile",
            EntityKind::Seed => "seed",
            EntityKind::NextQueue => "nextQueue",
            EntityKind::Board => "board",
            EntityKind::Combo => "combo",
            EntityKind::Record => "record",
            EntityKind::Time => "time",
            EntityKind::Moves => "moves",
            EntityKind::Focus => "focus",
            EntityKind::Message => "message",
            EntityKind::Score => "score",
        }
    }

    /// Transient feedback entities that gate phase evaluation or fade out
    pub fn is_sticker(&self) -> bool {
        matches!(self, EntityKind::Message | EntityKind::Score)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
