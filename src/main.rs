//! Headless runner (default binary).
//!
//! Plays one classic game with a fixed command cycle and prints the final
//! snapshot as JSON. Useful for replaying a seed and eyeballing the rules.
//!
//! Usage: `tile-bust [seed] [moves]`

use anyhow::{bail, Context, Result};
use log::{debug, info};

use tile_bust::core::{Game, PresentationTable, Settings};
use tile_bust::types::{Command, Phase};

/// Commands issued in turn whenever the game is ready; shuffles are rarer.
const COMMAND_CYCLE: [Command; 9] = [
    Command::Up,
    Command::Left,
    Command::Down,
    Command::Right,
    Command::Up,
    Command::Right,
    Command::Down,
    Command::Left,
    Command::Shuffle,
];

/// Hard stop in case the game never reaches game over.
const MAX_TICKS: u32 = 100_000;

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid seed {raw:?}"))?,
        None => 1,
    };
    let mut settings = Settings::default().with_seed(seed);
    if let Some(raw) = args.next() {
        let moves = raw
            .parse::<u32>()
            .with_context(|| format!("invalid move limit {raw:?}"))?;
        settings = settings.with_move_limit(moves);
    }

    let mut game = Game::new(settings, PresentationTable::headless())?;
    let mut next_command = 0usize;
    let mut ticks = 0u32;

    loop {
        let phase = game.tick()?;
        ticks += 1;

        if phase == Phase::GameOver {
            break;
        }
        if phase == Phase::Ready && game.command() == Command::None {
            let command = COMMAND_CYCLE[next_command % COMMAND_CYCLE.len()];
            next_command += 1;
            debug!("tick {}: {}", ticks, command.as_str());
            game.set_command(command);
        }
        if ticks >= MAX_TICKS {
            bail!("game did not finish within {} ticks", MAX_TICKS);
        }
    }

    let snapshot = game.snapshot()?;
    info!(
        "finished after {} ticks: score={} busts={} max_combo={}",
        ticks, snapshot.score, snapshot.bust_count, snapshot.max_combo
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
