//! Snapshot module - plain-data view of a game for renderers and tooling

use crate::entity::EntityId;
use crate::error::Result;
use crate::focus::Focus;
use crate::game::Game;
use crate::tile::{Tile, TileSpec};
use crate::types::{GameMode, Phase, TileKind, TileState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSnapshot {
    pub id: u32,
    pub kind: TileKind,
    pub color: u8,
    pub toughness: u8,
    pub row: i32,
    pub col: i32,
    pub state: TileState,
}

impl TileSnapshot {
    pub fn new(id: EntityId, tile: &Tile) -> Self {
        Self {
            id: id.raw(),
            kind: tile.kind(),
            color: tile.color(),
            toughness: tile.toughness(),
            row: tile.row(),
            col: tile.col(),
            state: tile.state(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub phase: Phase,
    pub mode: GameMode,
    pub seed: u32,
    pub rows: i32,
    pub cols: i32,
    pub score: u64,
    pub bust_count: u32,
    pub move_count: u32,
    pub max_combo: u32,
    pub combo_count: u32,
    pub combo_gauge: f64,
    pub combo_bonus: f64,
    /// Fraction of the time limit left; time-attack only
    pub time_remain: Option<f64>,
    /// Moves left; classic only
    pub moves_remain: Option<u32>,
    pub focus: Focus,
    /// Every live tile, off-board arrivals included
    pub tiles: Vec<TileSnapshot>,
    /// Queued descriptors, next to enter first
    pub seeds: Vec<TileSpec>,
    /// `rows` rows of `cols` cells
    pub grid: Vec<Vec<Option<TileSnapshot>>>,
    pub messages: Vec<String>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Result<Self> {
        let board = game.board()?;
        let record = game.record()?;
        let combo = game.combo()?;

        let tiles: Vec<TileSnapshot> = game
            .tiles()
            .iter()
            .map(|(id, tile)| TileSnapshot::new(*id, tile))
            .collect();

        let (rows, cols) = (board.rows(), board.cols());
        let mut grid = vec![vec![None; cols as usize]; rows as usize];
        for tile in &tiles {
            if board.in_bounds(tile.row, tile.col) {
                grid[tile.row as usize][tile.col as usize] = Some(*tile);
            }
        }

        Ok(Self {
            phase: game.phase(),
            mode: game.mode(),
            seed: game.settings().seed,
            rows,
            cols,
            score: record.score(),
            bust_count: record.bust_count(),
            move_count: record.move_count(),
            max_combo: record.max_combo(),
            combo_count: combo.count(),
            combo_gauge: combo.gauge(),
            combo_bonus: combo.bonus(),
            time_remain: game.time().map(|time| time.remain()),
            moves_remain: game.moves().map(|moves| moves.remain()),
            focus: game.focus()?,
            tiles,
            seeds: game.seeds().iter().map(|seed| seed.spec()).collect(),
            grid,
            messages: game.messages().into_iter().map(String::from).collect(),
        })
    }

    /// Tiles inside the visible extent
    pub fn occupied(&self) -> usize {
        self.grid.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    pub fn playable(&self) -> bool {
        !self.phase.is_terminal()
    }
}
