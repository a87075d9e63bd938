//! Tile Bust (workspace facade crate).
//!
//! Keeps a single `tile_bust::{core,types}` entry point while the
//! implementation lives in dedicated crates under `crates/`.

pub use tile_bust_core as core;
pub use tile_bust_types as types;
