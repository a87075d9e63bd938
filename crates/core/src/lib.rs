//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and the simulation of a tile-matching puzzle:
//! a grid of colored tiles that the player slides in one of four directions.
//! Groups of same-color tiles above a size threshold are busted, and the board
//! refills from a lookahead queue. It has **no dependencies** on rendering,
//! input devices, or I/O; a renderer plugs in through the
//! [`Presentation`](presentation::Presentation) trait.
//!
//! # Module Structure
//!
//! - [`pool`] / [`entity`]: dependency-ordered entity scheduler with release hooks
//! - [`tile`] / [`queue`]: tiles, queued seeds and the refilling next queue
//! - [`board`]: overlap checks, flood-fill grouping, slide and shuffle
//! - [`combo`], [`record`], [`budget`], [`focus`]: the auxiliary trackers
//! - [`game`]: the phase state machine that drives one game
//! - [`world`]: the explicit context (pool, settings, RNG, presentations)
//!
//! # Game Rules
//!
//! - **Slide**: every lane compacts toward the chosen edge; new tiles enter
//!   from beyond the opposite edge
//! - **Bust**: 4-connected same-color groups inside the focus mask of at least
//!   `bust_threshold` tiles are destroyed, along with adjacent special tiles
//! - **Toughness**: tough tiles survive a bust with one less hit point
//! - **Combo**: consecutive busting slides raise a multiplier on the score
//! - **Budget**: a game ends when its moves (classic) or time (time attack)
//!   run out
//!
//! # Example
//!
//! ```
//! use tile_bust_core::{Game, PresentationTable, Settings};
//! use tile_bust_types::{Command, Phase};
//!
//! let mut game = Game::new(Settings::default().with_seed(42), PresentationTable::headless())
//!     .unwrap();
//!
//! // The board starts empty; the first slide fills it.
//! assert_eq!(game.tick().unwrap(), Phase::Ready);
//! game.set_command(Command::Up);
//! assert_eq!(game.tick().unwrap(), Phase::BlockSlide);
//! assert_eq!(game.tiles().len(), 16);
//! ```
//!
//! # Timing
//!
//! The core has no clock. Call [`Game::tick`](game::Game::tick) once per frame;
//! the time budget and combo gauge convert their second-based limits with
//! [`Settings::fps`](settings::Settings::fps).

pub mod board;
pub mod budget;
pub mod combo;
pub mod entity;
pub mod error;
pub mod focus;
pub mod game;
pub mod pool;
pub mod presentation;
pub mod queue;
pub mod record;
pub mod rng;
pub mod settings;
pub mod snapshot;
pub mod sticker;
pub mod tile;
pub mod world;

pub use tile_bust_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BustGroup};
pub use budget::{MoveBudget, TimeBudget};
pub use combo::Combo;
pub use entity::{Body, Entity, EntityId, ReleaseHook, Status};
pub use error::{CoreError, Result};
pub use focus::Focus;
pub use game::Game;
pub use pool::Pool;
pub use presentation::{Presentation, PresentationTable};
pub use queue::{NextQueue, SeedRules};
pub use record::{calculate_bust_score, Record};
pub use rng::SimpleRng;
pub use settings::Settings;
pub use snapshot::{GameSnapshot, TileSnapshot};
pub use sticker::{MessageSticker, ScoreSticker};
pub use tile::{Tile, TileSeed, TileSpec};
pub use world::World;
