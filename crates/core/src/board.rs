//! Board module - the grid of live tiles and the rules that move them
//!
//! The board entity owns no tile storage of its own: its live tiles are
//! exactly its dependents in the pool, in creation order. Every operation
//! rebuilds a dense `rows x cols` view from those tiles first, failing with
//! [`CoreError::OverlapViolation`] if two tiles claim one cell.
//!
//! Coordinates: `(row, col)`, row 0 at the top. Tiles spawned by a slide start
//! just beyond the trailing edge and move in, so the slide always reports a
//! change when it introduces a tile.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use log::debug;

use crate::entity::{Body, EntityId};
use crate::error::{CoreError, Result};
use crate::focus::Focus;
use crate::pool::Pool;
use crate::queue::NextQueue;
use crate::tile::Tile;
use crate::types::{Direction, TileKind};
use crate::world::World;

/// One matched normal group plus the specials it takes down with it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BustGroup {
    /// Same-color normal tiles; the first one is the tile the scan started from
    pub normals: Vec<EntityId>,
    /// Special tiles orthogonally adjacent to the group
    pub specials: Vec<EntityId>,
}

impl BustGroup {
    /// Tile the score feedback is anchored to
    pub fn primary(&self) -> Option<EntityId> {
        self.normals.first().copied()
    }

    /// Every tile the group destroys
    pub fn len(&self) -> usize {
        self.normals.len() + self.specials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normals.is_empty() && self.specials.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.normals.iter().chain(self.specials.iter()).copied()
    }
}

/// Dense lookup of on-board tiles, rebuilt for every operation
#[derive(Debug, Clone)]
struct View {
    rows: i32,
    cols: i32,
    cells: Vec<Option<EntityId>>,
}

impl View {
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= self.rows || col < 0 || col >= self.cols {
            return None;
        }
        Some((row * self.cols + col) as usize)
    }

    fn get(&self, row: i32, col: i32) -> Option<EntityId> {
        self.index(row, col).and_then(|idx| self.cells[idx])
    }

    fn set(&mut self, row: i32, col: i32, id: Option<EntityId>) {
        if let Some(idx) = self.index(row, col) {
            self.cells[idx] = id;
        }
    }
}

fn neighbours(row: i32, col: i32) -> ArrayVec<(i32, i32), 4> {
    let mut out = ArrayVec::new();
    out.push((row + 1, col));
    out.push((row, col + 1));
    out.push((row - 1, col));
    out.push((row, col - 1));
    out
}

/// Board configuration; the tiles themselves live in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    id: EntityId,
    next: EntityId,
    rows: i32,
    cols: i32,
    bust_threshold: usize,
    focus: EntityId,
}

impl Board {
    /// `id` is the board's own pool id, `next` the queue that feeds it and
    /// `focus` the pooled mask that limits grouping and shuffling
    pub fn new(
        id: EntityId,
        next: EntityId,
        rows: i32,
        cols: i32,
        bust_threshold: usize,
        focus: EntityId,
    ) -> Self {
        Self {
            id,
            next,
            rows,
            cols,
            bust_threshold,
            focus,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn next_queue(&self) -> EntityId {
        self.next
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn bust_threshold(&self) -> usize {
        self.bust_threshold
    }

    pub fn focus_id(&self) -> EntityId {
        self.focus
    }

    /// The focus mask as it currently stands in the pool
    pub fn focus(&self, pool: &Pool) -> Result<Focus> {
        pool.focus(self.focus).copied()
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    /// Live tile ids in creation order
    pub fn tile_ids<'a>(&self, pool: &'a Pool) -> impl Iterator<Item = EntityId> + 'a {
        pool.dependents(self.id)
            .iter()
            .copied()
            .filter(move |id| pool.body(*id).and_then(Body::as_tile).is_some())
    }

    pub fn tiles<'a>(&self, pool: &'a Pool) -> impl Iterator<Item = (EntityId, &'a Tile)> + 'a {
        pool.dependents(self.id)
            .iter()
            .filter_map(move |id| pool.body(*id).and_then(Body::as_tile).map(|tile| (*id, tile)))
    }

    /// Tile occupying `(row, col)`, if any
    pub fn tile_at(&self, pool: &Pool, row: i32, col: i32) -> Result<Option<EntityId>> {
        Ok(self.view(pool)?.get(row, col))
    }

    /// True once every tile has finished moving or busting
    pub fn is_settled(&self, pool: &Pool) -> bool {
        self.tiles(pool).all(|(_, tile)| tile.is_settled())
    }

    /// Number of tiles inside the visible extent
    pub fn occupied(&self, pool: &Pool) -> usize {
        self.tiles(pool)
            .filter(|(_, tile)| self.in_bounds(tile.row(), tile.col()))
            .count()
    }

    fn view(&self, pool: &Pool) -> Result<View> {
        let mut view = View {
            rows: self.rows,
            cols: self.cols,
            cells: vec![None; (self.rows * self.cols).max(0) as usize],
        };
        for (id, tile) in self.tiles(pool) {
            let (row, col) = tile.position();
            if let Some(first) = view.get(row, col) {
                return Err(CoreError::OverlapViolation {
                    row,
                    col,
                    first,
                    second: id,
                });
            }
            view.set(row, col, Some(id));
        }
        Ok(view)
    }

    /// Collect every same-color group large enough to bust
    ///
    /// Groups are 4-connected, confined to the focus mask and made only of
    /// settled normal tiles. Each qualifying group brings along the special
    /// tiles orthogonally adjacent to it. Groups come out in the order their
    /// first tile appears in the tile list, so scoring order is reproducible.
    pub fn group_for_bust(&self, pool: &Pool) -> Result<VecDeque<BustGroup>> {
        let focus = self.focus(pool)?;
        let view = self.view(pool)?;
        let mut consumed = vec![false; view.cells.len()];
        let mut groups = VecDeque::new();

        let candidate = |row: i32, col: i32, start: &Tile| -> Option<EntityId> {
            let id = view.get(row, col)?;
            let tile = pool.tile(id).ok()?;
            let eligible = focus.contains(row, col) && tile.is_settled() && tile.matches(start);
            eligible.then_some(id)
        };

        for (start_id, start) in self.tiles(pool) {
            let (row, col) = start.position();
            let Some(idx) = view.index(row, col) else {
                continue;
            };
            if consumed[idx] || candidate(row, col, start).is_none() {
                continue;
            }

            let color = start.color();
            let mut normals = Vec::new();
            let mut stack = vec![(row, col, start_id)];
            consumed[idx] = true;
            while let Some((r, c, id)) = stack.pop() {
                normals.push(id);
                for (nr, nc) in neighbours(r, c).into_iter().rev() {
                    let Some(nidx) = view.index(nr, nc) else {
                        continue;
                    };
                    if consumed[nidx] {
                        continue;
                    }
                    if let Some(nid) = candidate(nr, nc, start) {
                        consumed[nidx] = true;
                        stack.push((nr, nc, nid));
                    }
                }
            }

            if normals.len() < self.bust_threshold {
                continue;
            }

            let mut specials = Vec::new();
            for id in &normals {
                let (r, c) = pool.tile(*id)?.position();
                for (nr, nc) in neighbours(r, c) {
                    let Some(nidx) = view.index(nr, nc) else {
                        continue;
                    };
                    let Some(nid) = view.cells[nidx] else {
                        continue;
                    };
                    if consumed[nidx] || pool.tile(nid)?.kind() != TileKind::Special {
                        continue;
                    }
                    consumed[nidx] = true;
                    specials.push(nid);
                }
            }

            debug!(
                "bust group of {} color {} with {} specials at ({}, {})",
                normals.len(),
                color,
                specials.len(),
                row,
                col
            );
            groups.push_back(BustGroup { normals, specials });
        }

        Ok(groups)
    }

    /// Mark every tile of the group busted
    pub fn bust(&self, pool: &mut Pool, group: &BustGroup) -> Result<()> {
        for id in group.tiles() {
            pool.tile_mut(id)?.bust();
        }
        Ok(())
    }

    /// Map lane position `index` (0 = leading edge) to a cell
    ///
    /// Indices at or past the lane length land beyond the trailing edge.
    fn lane_cell(&self, direction: Direction, lane: i32, index: i32) -> (i32, i32) {
        match direction {
            Direction::Up => (index, lane),
            Direction::Down => (self.rows - 1 - index, lane),
            Direction::Left => (lane, index),
            Direction::Right => (lane, self.cols - 1 - index),
        }
    }

    /// Lanes in the order new tiles are handed out
    fn lanes(&self, direction: Direction) -> Vec<i32> {
        match direction {
            Direction::Up => (0..self.cols).collect(),
            Direction::Down => (0..self.cols).rev().collect(),
            Direction::Left => (0..self.rows).rev().collect(),
            Direction::Right => (0..self.rows).collect(),
        }
    }

    /// Slide every lane toward `direction` and refill from the next queue
    ///
    /// Tiles keep their identity: gaps close by relocating them, and the
    /// trailing empty cells are filled with tiles spawned past the trailing
    /// edge, which then move into place. Returns whether anything moved or
    /// entered the board.
    pub fn slide(&self, world: &mut World, direction: Direction) -> Result<bool> {
        let view = self.view(&world.pool)?;
        let lane_len = if direction.is_vertical() {
            self.rows
        } else {
            self.cols
        };

        let lanes = self.lanes(direction);
        let mut missing = Vec::with_capacity(lanes.len());
        let mut moved = false;

        // Compact
        for &lane in &lanes {
            let mut dest = 0;
            for index in 0..lane_len {
                let (row, col) = self.lane_cell(direction, lane, index);
                let Some(id) = view.get(row, col) else {
                    continue;
                };
                if index != dest {
                    let (to_row, to_col) = self.lane_cell(direction, lane, dest);
                    world.pool.tile_mut(id)?.move_to(to_row, to_col);
                    moved = true;
                }
                dest += 1;
            }
            missing.push(lane_len - dest);
        }

        // Fill: the j-th new tile of every lane is handed out before any
        // lane gets its (j+1)-th.
        let deepest = missing.iter().copied().max().unwrap_or(0);
        for j in 0..deepest {
            for (slot, &lane) in lanes.iter().enumerate() {
                if j >= missing[slot] {
                    continue;
                }
                let spec = NextQueue::pop(world, self.next)?;
                let (spawn_row, spawn_col) = self.lane_cell(direction, lane, lane_len + j);
                let tile_id = world.spawn(Body::Tile(Tile::new(spec, spawn_row, spawn_col)));
                world.pool.depend(self.id, tile_id)?;

                let dest = lane_len - missing[slot] + j;
                let (to_row, to_col) = self.lane_cell(direction, lane, dest);
                world.pool.tile_mut(tile_id)?.move_to(to_row, to_col);
                moved = true;
            }
        }

        debug!(
            "slide {}: moved={} spawned={}",
            direction.as_str(),
            moved,
            missing.iter().sum::<i32>()
        );
        Ok(moved)
    }

    /// Scatter every focused tile to a random focused cell
    ///
    /// Each focused tile swaps with whatever occupies a uniformly drawn
    /// focused cell (empty cells included). Draws outside the focus are
    /// rejected and redrawn.
    pub fn shuffle(&self, world: &mut World) -> Result<bool> {
        let focus = self.focus(&world.pool)?;
        if focus.cells_within(self.rows, self.cols) == 0 {
            return Ok(false);
        }

        let mut view = self.view(&world.pool)?;
        let ids: Vec<EntityId> = self.tile_ids(&world.pool).collect();
        let mut shuffled = false;

        for id in ids {
            let (row, col) = world.pool.tile(id)?.position();
            if !self.in_bounds(row, col) || !focus.contains(row, col) {
                continue;
            }

            let (to_row, to_col) = loop {
                let r = world.rng.next_range(self.rows as u32) as i32;
                let c = world.rng.next_range(self.cols as u32) as i32;
                if focus.contains(r, c) {
                    break (r, c);
                }
            };

            let other = view.get(to_row, to_col);
            view.set(row, col, other);
            if let Some(other) = other {
                world.pool.tile_mut(other)?.move_to(row, col);
            }
            view.set(to_row, to_col, Some(id));
            world.pool.tile_mut(id)?.move_to(to_row, to_col);
            shuffled = true;
        }

        debug!("shuffle: shuffled={}", shuffled);
        Ok(shuffled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::PresentationTable;
    use crate::queue::SeedRules;
    use crate::settings::Settings;
    use crate::tile::TileSpec;
    use crate::types::TileState;

    struct Fixture {
        world: World,
        board: Board,
    }

    impl Fixture {
        fn new(rows: i32, cols: i32, threshold: usize, focus: Focus) -> Self {
            let mut world = World::new(Settings::default(), PresentationTable::headless());
            let rules = SeedRules {
                block_colors: 4,
                special_freq: 0,
                tough_freq: 0,
                toughness_max: 1,
            };
            let next = world.spawn(Body::NextQueue(NextQueue::new(
                (rows * cols) as usize,
                rules,
            )));
            let focus = world.spawn(Body::Focus(focus));
            let id = world.spawn_with(|id| {
                Body::Board(Board::new(id, next, rows, cols, threshold, focus))
            });
            let board = *world.pool.board(id).unwrap();
            Self { world, board }
        }

        /// Place tiles from a picture: digits are normal colors, `*` special,
        /// `.` empty.
        fn place(&mut self, rows: &[&str]) -> Vec<EntityId> {
            let mut ids = Vec::new();
            for (r, line) in rows.iter().enumerate() {
                for (c, ch) in line.chars().enumerate() {
                    let spec = match ch {
                        '.' => continue,
                        '*' => TileSpec::special(),
                        d => TileSpec::normal(d.to_digit(10).unwrap() as u8),
                    };
                    ids.push(self.add(spec, r as i32, c as i32));
                }
            }
            ids
        }

        fn add(&mut self, spec: TileSpec, row: i32, col: i32) -> EntityId {
            let id = self.world.spawn(Body::Tile(Tile::new(spec, row, col)));
            self.world.pool.depend(self.board.id(), id).unwrap();
            id
        }

        fn settle(&mut self) {
            for _ in 0..4 {
                self.world.pool.tick().unwrap();
            }
        }

        fn picture(&self) -> Vec<String> {
            (0..self.board.rows())
                .map(|r| {
                    (0..self.board.cols())
                        .map(|c| {
                            match self.board.tile_at(&self.world.pool, r, c).unwrap() {
                                None => '.',
                                Some(id) => {
                                    let tile = self.world.pool.tile(id).unwrap();
                                    match tile.kind() {
                                        TileKind::Special => '*',
                                        TileKind::Normal => {
                                            char::from_digit(tile.color() as u32, 10).unwrap()
                                        }
                                    }
                                }
                            }
                        })
                        .collect()
                })
                .collect()
        }
    }

    #[test]
    fn test_overlap_is_fatal() {
        let mut fx = Fixture::new(3, 3, 3, Focus::covering(3, 3));
        let a = fx.add(TileSpec::normal(0), 1, 1);
        let b = fx.add(TileSpec::normal(1), 1, 1);
        assert_eq!(
            fx.board.group_for_bust(&fx.world.pool),
            Err(CoreError::OverlapViolation {
                row: 1,
                col: 1,
                first: a,
                second: b
            })
        );
    }

    #[test]
    fn test_off_board_tiles_are_ignored_by_view() {
        let mut fx = Fixture::new(3, 3, 3, Focus::covering(3, 3));
        fx.add(TileSpec::normal(0), -1, 0);
        fx.add(TileSpec::normal(0), -2, 0);
        assert_eq!(fx.board.occupied(&fx.world.pool), 0);
        assert!(fx.board.group_for_bust(&fx.world.pool).unwrap().is_empty());
    }

    #[test]
    fn test_group_below_threshold_untouched() {
        let mut fx = Fixture::new(3, 3, 3, Focus::covering(3, 3));
        fx.place(&["00.", "1..", "..."]);
        assert!(fx.board.group_for_bust(&fx.world.pool).unwrap().is_empty());
    }

    #[test]
    fn test_group_is_four_connected_only() {
        let mut fx = Fixture::new(3, 3, 2, Focus::covering(3, 3));
        // Diagonal neighbours never join.
        fx.place(&["0.0", ".0.", "0.0"]);
        assert!(fx.board.group_for_bust(&fx.world.pool).unwrap().is_empty());
    }

    #[test]
    fn test_group_with_adjacent_special() {
        let mut fx = Fixture::new(3, 3, 3, Focus::covering(3, 3));
        let ids = fx.place(&["000", "*1.", "..*"]);
        let groups = fx.board.group_for_bust(&fx.world.pool).unwrap();

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.normals.len(), 3);
        assert_eq!(group.primary(), Some(ids[0]));
        // Only the special below (0, 0) touches the group.
        assert_eq!(group.specials, vec![ids[3]]);
    }

    #[test]
    fn test_special_never_joins_or_bridges() {
        let mut fx = Fixture::new(1, 5, 2, Focus::covering(1, 5));
        fx.place(&["0*0.0"]);
        assert!(fx.board.group_for_bust(&fx.world.pool).unwrap().is_empty());
    }

    #[test]
    fn test_special_shared_by_two_groups_counted_once() {
        let mut fx = Fixture::new(1, 5, 2, Focus::covering(1, 5));
        let ids = fx.place(&["00*11"]);
        let groups = fx.board.group_for_bust(&fx.world.pool).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].specials, vec![ids[2]]);
        assert!(groups[1].specials.is_empty());
    }

    #[test]
    fn test_focus_halts_fill() {
        // Focus covers cols 0..=1 only.
        let mut fx = Fixture::new(1, 4, 3, Focus::new(0, 0, 0, 1));
        fx.place(&["0000"]);
        assert!(fx.board.group_for_bust(&fx.world.pool).unwrap().is_empty());

        let mut fx = Fixture::new(1, 4, 2, Focus::new(0, 0, 0, 1));
        let ids = fx.place(&["0000"]);
        let groups = fx.board.group_for_bust(&fx.world.pool).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].normals.len(), 2);
        assert!(!groups[0].normals.contains(&ids[2]));
    }

    #[test]
    fn test_focus_is_read_from_the_pool() {
        let mut fx = Fixture::new(1, 4, 3, Focus::covering(1, 4));
        fx.place(&["0000"]);
        assert_eq!(fx.board.group_for_bust(&fx.world.pool).unwrap().len(), 1);

        *fx.world.pool.focus_mut(fx.board.focus_id()).unwrap() = Focus::new(0, 2, 0, 1);
        assert_eq!(
            fx.board.focus(&fx.world.pool).unwrap(),
            Focus::new(0, 2, 0, 1)
        );
        assert!(fx.board.group_for_bust(&fx.world.pool).unwrap().is_empty());
        assert!(fx.board.shuffle(&mut fx.world).unwrap());
    }

    #[test]
    fn test_groups_follow_scan_order() {
        let mut fx = Fixture::new(2, 4, 2, Focus::covering(2, 4));
        let ids = fx.place(&["1100", "2233"]);
        let groups = fx.board.group_for_bust(&fx.world.pool).unwrap();
        let primaries: Vec<_> = groups.iter().filter_map(BustGroup::primary).collect();
        assert_eq!(primaries, vec![ids[0], ids[2], ids[4], ids[6]]);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let mut fx = Fixture::new(3, 3, 2, Focus::covering(3, 3));
        fx.place(&["001", "*11", "220"]);
        let first = fx.board.group_for_bust(&fx.world.pool).unwrap();
        let second = fx.board.group_for_bust(&fx.world.pool).unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_unsettled_tiles_do_not_group() {
        let mut fx = Fixture::new(1, 3, 3, Focus::covering(1, 3));
        let ids = fx.place(&["000"]);
        fx.world.pool.tile_mut(ids[1]).unwrap().move_to(0, 1);
        assert!(fx.board.group_for_bust(&fx.world.pool).unwrap().is_empty());
        fx.settle();
        assert_eq!(fx.board.group_for_bust(&fx.world.pool).unwrap().len(), 1);
    }

    #[test]
    fn test_bust_marks_all_tiles() {
        let mut fx = Fixture::new(2, 3, 3, Focus::covering(2, 3));
        fx.place(&["000", "*.."]);
        let groups = fx.board.group_for_bust(&fx.world.pool).unwrap();
        fx.board.bust(&mut fx.world.pool, &groups[0]).unwrap();
        for id in groups[0].tiles() {
            assert_eq!(fx.world.pool.tile(id).unwrap().state(), TileState::Busted);
        }

        fx.settle();
        assert_eq!(fx.board.occupied(&fx.world.pool), 0);
        assert_eq!(fx.board.tile_ids(&fx.world.pool).count(), 0);
    }

    #[test]
    fn test_slide_compacts_without_recreating() {
        let mut fx = Fixture::new(3, 1, 3, Focus::covering(3, 1));
        NextQueue::refill(&mut fx.world, fx.board.next_queue()).unwrap();
        let ids = fx.place(&[".", "1", "."]);

        assert!(fx.board.slide(&mut fx.world, Direction::Down).unwrap());
        assert_eq!(fx.world.pool.tile(ids[0]).unwrap().position(), (2, 0));
        assert_eq!(fx.board.tile_ids(&fx.world.pool).count(), 3);
        fx.settle();
        assert_eq!(fx.board.occupied(&fx.world.pool), 3);
    }

    #[test]
    fn test_slide_spawns_past_trailing_edge() {
        let mut fx = Fixture::new(2, 2, 3, Focus::covering(2, 2));
        NextQueue::refill(&mut fx.world, fx.board.next_queue()).unwrap();
        fx.place(&["0.", ".."]);

        fx.board.slide(&mut fx.world, Direction::Up).unwrap();
        let spawned: Vec<_> = fx
            .board
            .tiles(&fx.world.pool)
            .skip(1)
            .map(|(_, tile)| (tile.state(), tile.position()))
            .collect();
        assert_eq!(spawned.len(), 3);
        assert!(spawned.iter().all(|(state, _)| *state == TileState::Moved));
        fx.settle();
        assert_eq!(fx.board.occupied(&fx.world.pool), 4);
        assert_eq!(fx.picture()[0].chars().next(), Some('0'));
    }

    #[test]
    fn test_slide_on_full_compact_board_is_noop() {
        let mut fx = Fixture::new(2, 2, 3, Focus::covering(2, 2));
        NextQueue::refill(&mut fx.world, fx.board.next_queue()).unwrap();
        fx.place(&["01", "23"]);
        for direction in Direction::ALL {
            assert!(!fx.board.slide(&mut fx.world, direction).unwrap());
        }
        assert_eq!(fx.picture(), vec!["01", "23"]);
    }

    #[test]
    fn test_slide_left_and_right() {
        let mut fx = Fixture::new(1, 4, 3, Focus::covering(1, 4));
        NextQueue::refill(&mut fx.world, fx.board.next_queue()).unwrap();
        let ids = fx.place(&[".1.2"]);

        fx.board.slide(&mut fx.world, Direction::Left).unwrap();
        assert_eq!(fx.world.pool.tile(ids[0]).unwrap().position(), (0, 0));
        assert_eq!(fx.world.pool.tile(ids[1]).unwrap().position(), (0, 1));
        fx.settle();
        assert_eq!(&fx.picture()[0][..2], "12");
    }

    #[test]
    fn test_slide_without_queue_fails() {
        let mut fx = Fixture::new(2, 2, 3, Focus::covering(2, 2));
        fx.place(&["0.", ".."]);
        assert_eq!(
            fx.board.slide(&mut fx.world, Direction::Up),
            Err(CoreError::QueueExhausted)
        );
    }

    #[test]
    fn test_shuffle_keeps_tile_set_and_no_overlap() {
        let mut fx = Fixture::new(3, 3, 3, Focus::covering(3, 3));
        let ids = fx.place(&["012", "3.0", "12*"]);

        assert!(fx.board.shuffle(&mut fx.world).unwrap());
        fx.settle();

        // Rebuilding the view would fail on overlap.
        assert_eq!(fx.board.occupied(&fx.world.pool), ids.len());
        let live: Vec<_> = fx.board.tile_ids(&fx.world.pool).collect();
        assert_eq!(live, ids);
    }

    #[test]
    fn test_shuffle_respects_focus() {
        // Focus covers the first two columns.
        let mut fx = Fixture::new(2, 4, 3, Focus::new(0, 0, 1, 1));
        let ids = fx.place(&["0123", "0123"]);
        fx.board.shuffle(&mut fx.world).unwrap();
        for id in ids {
            let tile = fx.world.pool.tile(id).unwrap();
            let focused = tile.col() <= 1;
            assert_eq!(focused, tile.color() <= 1);
        }
    }

    #[test]
    fn test_shuffle_focus_outside_board() {
        let mut fx = Fixture::new(2, 2, 3, Focus::new(5, 5, 1, 1));
        fx.place(&["01", "23"]);
        assert!(!fx.board.shuffle(&mut fx.world).unwrap());
    }
}
