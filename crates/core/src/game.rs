//! Game module - the phase state machine driving one game
//!
//! Each [`Game::tick`] advances the pool once, then evaluates the current
//! phase, but only when no message sticker is showing and every tile has
//! settled. All waiting is expressed that way: a phase simply re-evaluates on
//! a later tick.

use std::collections::VecDeque;

use log::{debug, error, info};

use crate::board::{Board, BustGroup};
use crate::budget::{MoveBudget, TimeBudget};
use crate::combo::Combo;
use crate::entity::{Body, EntityId};
use crate::error::{CoreError, Result};
use crate::focus::Focus;
use crate::presentation::PresentationTable;
use crate::queue::NextQueue;
use crate::record::Record;
use crate::settings::Settings;
use crate::snapshot::GameSnapshot;
use crate::sticker::{MessageSticker, ScoreSticker};
use crate::tile::{Tile, TileSeed};
use crate::types::{
    Command, EntityKind, GameMode, Phase, INTRO_MESSAGES, OUT_OF_MOVES_MESSAGE, TIME_OVER_MESSAGE,
};
use crate::world::World;

/// The single live budget entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BudgetId {
    Moves(EntityId),
    Time(EntityId),
}

/// Pool ids of the long-lived entities
#[derive(Debug, Clone, Copy)]
struct Handles {
    record: EntityId,
    combo: EntityId,
    focus: EntityId,
    next: EntityId,
    budget: BudgetId,
    board: EntityId,
}

#[derive(Debug)]
pub struct Game {
    world: World,
    handles: Handles,
    phase: Phase,
    command: Command,
    bust_groups: VecDeque<BustGroup>,
    messages: VecDeque<&'static str>,
    fault: Option<CoreError>,
}

impl Game {
    /// Validate `settings` and build a fresh game
    pub fn new(settings: Settings, presentations: PresentationTable) -> Result<Self> {
        settings.validate()?;
        let mut world = World::new(settings, presentations);
        let handles = Self::populate(&mut world);
        let mut game = Self {
            world,
            handles,
            phase: Phase::NextCycle,
            command: Command::None,
            bust_groups: VecDeque::new(),
            messages: VecDeque::new(),
            fault: None,
        };
        game.start();
        Ok(game)
    }

    /// Drain every entity and start over with new settings
    ///
    /// Safe to call between any two ticks, including after a fault.
    pub fn initialize(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.world.restart(settings);
        self.handles = Self::populate(&mut self.world);
        self.start();
        Ok(())
    }

    /// Start over with the current settings
    pub fn reset(&mut self) {
        let settings = self.world.settings.clone();
        self.world.restart(settings);
        self.handles = Self::populate(&mut self.world);
        self.start();
    }

    fn populate(world: &mut World) -> Handles {
        let settings = world.settings.clone();

        let record = world.spawn(Body::Record(Record::new(settings.score_base)));
        let combo = world.spawn(Body::Combo(Combo::new(
            settings.combo_decrement(),
            settings.combo_bonus_coeff,
        )));
        let focus = world.spawn(Body::Focus(settings.focus()));
        let next = world.spawn(Body::NextQueue(NextQueue::new(
            settings.queue_capacity(),
            settings.seed_rules(),
        )));
        let budget = match settings.mode {
            GameMode::Classic => {
                BudgetId::Moves(world.spawn(Body::Moves(MoveBudget::new(settings.move_limit))))
            }
            GameMode::TimeAttack => {
                BudgetId::Time(world.spawn(Body::Time(TimeBudget::new(settings.time_decrement()))))
            }
        };
        let board = world.spawn_with(|id| {
            Body::Board(Board::new(
                id,
                next,
                i32::from(settings.rows),
                i32::from(settings.cols),
                settings.bust_threshold,
                focus,
            ))
        });

        Handles {
            record,
            combo,
            focus,
            next,
            budget,
            board,
        }
    }

    fn start(&mut self) {
        self.command = Command::None;
        self.bust_groups.clear();
        self.messages.clear();
        self.fault = None;

        if self.world.settings.mode.has_time_budget() {
            self.messages.extend(INTRO_MESSAGES);
            self.phase = Phase::CountDown;
        } else {
            self.phase = Phase::NextCycle;
        }

        let settings = &self.world.settings;
        info!(
            "game initialized: mode={:?} board={}x{} seed={}",
            settings.mode, settings.rows, settings.cols, settings.seed
        );
    }

    /// Queue the player's next action
    ///
    /// Consumed by the next `Ready` evaluation. Ignored once the game is over.
    pub fn set_command(&mut self, command: Command) {
        if self.phase.is_terminal() {
            debug!("ignoring {} after game over", command.as_str());
            return;
        }
        self.command = command;
    }

    /// Advance one frame and return the phase after it
    ///
    /// A fatal error latches: every later tick returns the same error until
    /// the game is initialized again.
    pub fn tick(&mut self) -> Result<Phase> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        match self.step() {
            Ok(()) => Ok(self.phase),
            Err(err) => {
                error!("game halted in {}: {}", self.phase.as_str(), err);
                self.fault = Some(err.clone());
                Err(err)
            }
        }
    }

    fn step(&mut self) -> Result<()> {
        self.world.pool.tick()?;

        if self.world.pool.any_of_kind(EntityKind::Message) {
            return Ok(());
        }
        let board = self.board()?;
        if !board.is_settled(&self.world.pool) {
            return Ok(());
        }

        let before = self.phase;
        match self.phase {
            Phase::CountDown => self.count_down()?,
            Phase::Ready => self.ready(&board)?,
            Phase::BlockSlide => {
                self.bust_groups = board.group_for_bust(&self.world.pool)?;
                let combo = self.world.pool.combo_mut(self.handles.combo)?;
                if self.bust_groups.is_empty() {
                    combo.break_streak();
                } else {
                    combo.stack();
                    let count = combo.count();
                    self.world
                        .pool
                        .record_mut(self.handles.record)?
                        .update_max_combo(count);
                }
                self.phase = Phase::BlockBust;
            }
            Phase::BlockShuffle => {
                self.bust_groups = board.group_for_bust(&self.world.pool)?;
                self.phase = Phase::BlockBust;
            }
            Phase::BlockBust => self.bust_next(&board)?,
            Phase::NextCycle => {
                NextQueue::refill(&mut self.world, self.handles.next)?;
                if self.world.settings.mode.has_time_budget() {
                    self.world
                        .pool
                        .combo_mut(self.handles.combo)?
                        .set_elapsing(true);
                }
                self.command = Command::None;
                self.phase = Phase::Ready;
            }
            Phase::GameOver => {}
        }

        if self.phase != before {
            debug!("phase {} -> {}", before.as_str(), self.phase.as_str());
        }
        Ok(())
    }

    fn count_down(&mut self) -> Result<()> {
        if let Some(text) = self.messages.pop_front() {
            self.world.spawn(Body::Message(MessageSticker::new(text)));
            return Ok(());
        }
        if let BudgetId::Time(id) = self.handles.budget {
            self.world.pool.time_mut(id)?.set_elapsing(true);
        }
        self.phase = Phase::NextCycle;
        Ok(())
    }

    fn ready(&mut self, board: &Board) -> Result<()> {
        let exhausted = match self.handles.budget {
            BudgetId::Moves(id) => self.world.pool.moves(id)?.is_exhausted(),
            BudgetId::Time(id) => self.world.pool.time(id)?.is_exhausted(),
        };
        if exhausted {
            let text = match self.handles.budget {
                BudgetId::Moves(_) => OUT_OF_MOVES_MESSAGE,
                BudgetId::Time(_) => TIME_OVER_MESSAGE,
            };
            self.world.pool.combo_mut(self.handles.combo)?.break_streak();
            self.world.spawn(Body::Message(MessageSticker::new(text)));
            self.command = Command::None;
            self.phase = Phase::GameOver;
            let record = self.record()?;
            info!(
                "game over ({}): score={} moves={} busts={} max_combo={}",
                text,
                record.score(),
                record.move_count(),
                record.bust_count(),
                record.max_combo()
            );
            return Ok(());
        }

        let command = std::mem::take(&mut self.command);
        let next = match command {
            Command::None => None,
            Command::Shuffle => {
                if board.shuffle(&mut self.world)? {
                    self.world.pool.combo_mut(self.handles.combo)?.break_streak();
                    Some(Phase::BlockShuffle)
                } else {
                    None
                }
            }
            _ => match command.direction() {
                Some(direction) => board
                    .slide(&mut self.world, direction)?
                    .then_some(Phase::BlockSlide),
                None => None,
            },
        };

        let Some(next) = next else {
            if command != Command::None {
                debug!("{} changed nothing", command.as_str());
            }
            return Ok(());
        };

        match self.handles.budget {
            BudgetId::Moves(id) => self.world.pool.moves_mut(id)?.consume(),
            BudgetId::Time(_) => self
                .world
                .pool
                .combo_mut(self.handles.combo)?
                .set_elapsing(false),
        }
        self.world.pool.record_mut(self.handles.record)?.add_move();
        self.phase = next;
        Ok(())
    }

    fn bust_next(&mut self, board: &Board) -> Result<()> {
        let Some(group) = self.bust_groups.pop_front() else {
            self.phase = Phase::NextCycle;
            return Ok(());
        };

        let bonus = self.combo()?.bonus();
        let score = self
            .world
            .pool
            .record_mut(self.handles.record)?
            .add_bust_score(&group, bonus);
        board.bust(&mut self.world.pool, &group)?;

        if let Some(primary) = group.primary() {
            let (row, col) = self.world.pool.tile(primary)?.position();
            self.world.spawn(Body::Score(ScoreSticker {
                row,
                col,
                score,
                count: group.normals.len(),
            }));
            debug!(
                "bust {} tiles at ({}, {}) for {} points",
                group.len(),
                row,
                col,
                score
            );
        }
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The error that halted the game, if any
    pub fn fault(&self) -> Option<&CoreError> {
        self.fault.as_ref()
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn settings(&self) -> &Settings {
        &self.world.settings
    }

    pub fn mode(&self) -> GameMode {
        self.world.settings.mode
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access to the simulation, for tooling and scripted setups
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn board(&self) -> Result<Board> {
        self.world.pool.board(self.handles.board).copied()
    }

    pub fn record(&self) -> Result<&Record> {
        self.world.pool.record(self.handles.record)
    }

    pub fn combo(&self) -> Result<&Combo> {
        self.world.pool.combo(self.handles.combo)
    }

    pub fn focus(&self) -> Result<Focus> {
        self.world.pool.focus(self.handles.focus).copied()
    }

    pub fn time(&self) -> Option<&TimeBudget> {
        match self.handles.budget {
            BudgetId::Time(id) => self.world.pool.time(id).ok(),
            BudgetId::Moves(_) => None,
        }
    }

    pub fn moves(&self) -> Option<&MoveBudget> {
        match self.handles.budget {
            BudgetId::Moves(id) => self.world.pool.moves(id).ok(),
            BudgetId::Time(_) => None,
        }
    }

    /// Groups found but not yet busted
    pub fn pending_groups(&self) -> &VecDeque<BustGroup> {
        &self.bust_groups
    }

    /// Live tiles in creation order, off-board arrivals included
    pub fn tiles(&self) -> Vec<(EntityId, Tile)> {
        match self.board() {
            Ok(board) => board
                .tiles(&self.world.pool)
                .map(|(id, tile)| (id, *tile))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Queued seeds, next to enter first
    pub fn seeds(&self) -> Vec<TileSeed> {
        let Ok(queue) = self.world.pool.next_queue(self.handles.next) else {
            return Vec::new();
        };
        queue
            .queued()
            .filter_map(|id| self.world.pool.seed(id).ok().copied())
            .collect()
    }

    /// Texts of the message stickers currently showing
    pub fn messages(&self) -> Vec<&str> {
        self.world
            .pool
            .iter()
            .filter_map(|entity| entity.body().as_message())
            .map(MessageSticker::text)
            .collect()
    }

    pub fn score_stickers(&self) -> Vec<ScoreSticker> {
        self.world
            .pool
            .iter()
            .filter_map(|entity| entity.body().as_score())
            .copied()
            .collect()
    }

    pub fn snapshot(&self) -> Result<GameSnapshot> {
        GameSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileSpec;
    use crate::types::Direction;

    fn classic() -> Settings {
        Settings::default().with_seed(7)
    }

    fn run_until(game: &mut Game, phase: Phase, max_ticks: usize) {
        for _ in 0..max_ticks {
            if game.tick().unwrap() == phase {
                return;
            }
        }
        panic!("never reached {:?}, stuck in {:?}", phase, game.phase());
    }

    #[test]
    fn test_classic_starts_in_next_cycle_with_empty_board() {
        let game = Game::new(classic(), PresentationTable::headless()).unwrap();
        assert_eq!(game.phase(), Phase::NextCycle);
        assert!(game.tiles().is_empty());
        assert_eq!(game.moves().unwrap().remain(), 30);
        assert!(game.time().is_none());
    }

    #[test]
    fn test_next_cycle_fills_queue() {
        let mut game = Game::new(classic(), PresentationTable::headless()).unwrap();
        assert_eq!(game.tick().unwrap(), Phase::Ready);
        assert_eq!(game.seeds().len(), 16);
    }

    #[test]
    fn test_first_slide_fills_board() {
        // No group can ever reach the threshold, so nothing busts.
        let settings = classic().with_bust_threshold(17);
        let mut game = Game::new(settings, PresentationTable::headless()).unwrap();
        run_until(&mut game, Phase::Ready, 5);

        game.set_command(Command::Up);
        assert_eq!(game.tick().unwrap(), Phase::BlockSlide);
        assert_eq!(game.tiles().len(), 16);
        assert_eq!(game.moves().unwrap().remain(), 29);
        assert_eq!(game.record().unwrap().move_count(), 1);

        run_until(&mut game, Phase::Ready, 50);
        let board = game.board().unwrap();
        assert_eq!(board.occupied(game.world().pool()), 16);
        assert_eq!(game.record().unwrap().bust_count(), 0);
    }

    #[test]
    fn test_command_consumed_once() {
        let mut game = Game::new(classic(), PresentationTable::headless()).unwrap();
        run_until(&mut game, Phase::Ready, 5);
        game.set_command(Command::None);
        assert_eq!(game.tick().unwrap(), Phase::Ready);
        assert_eq!(game.record().unwrap().move_count(), 0);

        game.set_command(Command::Down);
        game.tick().unwrap();
        assert_eq!(game.command(), Command::None);
    }

    #[test]
    fn test_noop_slide_is_free() {
        let settings = classic().with_bust_threshold(17);
        let mut game = Game::new(settings, PresentationTable::headless()).unwrap();
        run_until(&mut game, Phase::Ready, 5);
        game.set_command(Command::Up);
        game.tick().unwrap();
        run_until(&mut game, Phase::Ready, 50);

        for command in [Command::Up, Command::Down, Command::Left, Command::Right] {
            game.set_command(command);
            assert_eq!(game.tick().unwrap(), Phase::Ready);
        }
        assert_eq!(game.moves().unwrap().remain(), 29);
        assert_eq!(game.record().unwrap().move_count(), 1);
    }

    #[test]
    fn test_time_attack_intro_sequence() {
        let settings = classic().with_mode(GameMode::TimeAttack);
        let mut game = Game::new(settings, PresentationTable::headless()).unwrap();
        assert_eq!(game.phase(), Phase::CountDown);
        assert!(game.moves().is_none());

        let mut shown = Vec::new();
        for _ in 0..20 {
            game.tick().unwrap();
            shown.extend(game.messages().into_iter().map(String::from));
            if game.phase() != Phase::CountDown {
                break;
            }
        }
        assert_eq!(shown, INTRO_MESSAGES);
        assert_eq!(game.phase(), Phase::NextCycle);
        assert!(game.time().unwrap().is_elapsing());
    }

    #[test]
    fn test_time_over() {
        let settings = classic()
            .with_mode(GameMode::TimeAttack)
            .with_fps(10)
            .with_time_limit(0.5);
        let mut game = Game::new(settings, PresentationTable::headless()).unwrap();
        run_until(&mut game, Phase::GameOver, 100);
        assert!(game.time().unwrap().is_exhausted());
        assert_eq!(game.messages(), vec![TIME_OVER_MESSAGE]);
    }

    #[test]
    fn test_set_command_ignored_after_game_over() {
        let settings = classic().with_move_limit(1);
        let mut game = Game::new(settings, PresentationTable::headless()).unwrap();
        run_until(&mut game, Phase::Ready, 5);
        game.set_command(Command::Left);
        run_until(&mut game, Phase::GameOver, 100);

        game.set_command(Command::Right);
        assert_eq!(game.command(), Command::None);
        assert_eq!(game.tick().unwrap(), Phase::GameOver);
        assert_eq!(game.record().unwrap().move_count(), 1);
    }

    #[test]
    fn test_overlap_fault_latches_until_reset() {
        let mut game = Game::new(classic(), PresentationTable::headless()).unwrap();
        run_until(&mut game, Phase::Ready, 5);

        let board = game.board().unwrap();
        let world = game.world_mut();
        for _ in 0..2 {
            let id = world.spawn(Body::Tile(Tile::new(TileSpec::normal(0), 0, 0)));
            world.pool_mut().depend(board.id(), id).unwrap();
        }

        game.set_command(Command::Left);
        let err = game.tick().unwrap_err();
        assert!(matches!(err, CoreError::OverlapViolation { .. }));
        assert_eq!(game.tick(), Err(err));
        assert!(game.fault().is_some());

        game.reset();
        assert!(game.fault().is_none());
        assert_eq!(game.tick().unwrap(), Phase::Ready);
    }

    #[test]
    fn test_reset_rebuilds_same_game() {
        let mut game = Game::new(classic(), PresentationTable::headless()).unwrap();
        run_until(&mut game, Phase::Ready, 5);
        game.set_command(Direction::Left.into());
        run_until(&mut game, Phase::Ready, 50);
        let first: Vec<_> = game.seeds().iter().map(TileSeed::spec).collect();

        game.reset();
        assert_eq!(game.phase(), Phase::NextCycle);
        assert!(game.tiles().is_empty());
        run_until(&mut game, Phase::Ready, 5);
        game.set_command(Command::Left);
        run_until(&mut game, Phase::Ready, 50);
        let second: Vec<_> = game.seeds().iter().map(TileSeed::spec).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let result = Game::new(classic().with_colors(0), PresentationTable::headless());
        assert!(matches!(result, Err(CoreError::InvalidSettings(_))));
    }
}
