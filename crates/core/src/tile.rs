//! Tile module - game pieces and their queued descriptors
//!
//! A [`Tile`] sits on the grid and walks through its lifecycle one tick at a
//! time. A [`TileSeed`] is a tile that has not entered the grid yet; it waits
//! in the next queue and carries its rank there for presentation only.

use crate::entity::Status;
use crate::types::{TileKind, TileState};

/// Descriptor shared by seeds and the tiles spawned from them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSpec {
    pub kind: TileKind,
    /// Color class; meaningless for special tiles
    pub color: u8,
    /// Hits remaining before destruction
    pub toughness: u8,
}

impl TileSpec {
    pub fn normal(color: u8) -> Self {
        Self {
            kind: TileKind::Normal,
            color,
            toughness: 1,
        }
    }

    pub fn special() -> Self {
        Self {
            kind: TileKind::Special,
            color: 0,
            toughness: 1,
        }
    }

    pub fn with_toughness(self, toughness: u8) -> Self {
        Self {
            toughness: toughness.max(1),
            ..self
        }
    }
}

/// A positioned game piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    kind: TileKind,
    color: u8,
    toughness: u8,
    row: i32,
    col: i32,
    state: TileState,
}

impl Tile {
    /// Create an idle tile at `(row, col)`, which may lie outside the board
    pub fn new(spec: TileSpec, row: i32, col: i32) -> Self {
        Self {
            kind: spec.kind,
            color: spec.color,
            toughness: spec.toughness.max(1),
            row,
            col,
            state: TileState::Idle,
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn toughness(&self) -> u8 {
        self.toughness
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn is_normal(&self) -> bool {
        self.kind == TileKind::Normal
    }

    pub fn is_settled(&self) -> bool {
        self.state.is_settled()
    }

    /// Whether this tile can match `other` in a color group
    pub fn matches(&self, other: &Tile) -> bool {
        self.is_normal() && other.is_normal() && self.color == other.color
    }

    /// Relocate; the tile settles back to idle on a later tick
    pub fn move_to(&mut self, row: i32, col: i32) {
        self.row = row;
        self.col = col;
        self.state = TileState::Moved;
    }

    pub fn bust(&mut self) {
        self.state = TileState::Busted;
    }

    pub(crate) fn update(&mut self, busy: bool) -> Status {
        if busy {
            return Status::Keep;
        }

        match self.state {
            TileState::Idle => {}
            TileState::Moved => self.state = TileState::Idle,
            TileState::Busted => {
                self.toughness = self.toughness.saturating_sub(1);
                self.state = if self.toughness == 0 {
                    TileState::Dead
                } else {
                    TileState::Idle
                };
            }
            TileState::Dead => return Status::Remove,
        }
        Status::Keep
    }
}

/// A queued future tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSeed {
    spec: TileSpec,
    rank: usize,
    total: usize,
    alive: bool,
}

impl TileSeed {
    pub fn new(spec: TileSpec, rank: usize, total: usize) -> Self {
        Self {
            spec,
            rank,
            total,
            alive: true,
        }
    }

    pub fn spec(&self) -> TileSpec {
        self.spec
    }

    /// Position in the lookahead queue, 0 = next to enter the board
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Capacity of the queue this seed sits in
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn rerank(&mut self, rank: usize, total: usize) {
        self.rank = rank;
        self.total = total;
    }

    /// Consumed or orphaned; leaves the pool on its next update
    pub(crate) fn retire(&mut self) {
        self.alive = false;
    }

    pub(crate) fn update(&mut self) -> Status {
        if self.alive {
            Status::Keep
        } else {
            Status::Remove
        }
    }
}
