mod bot;

use std::{fs, path::PathBuf};

use bot::Bot;
use clap::Parser;
use color_eyre::eyre::{ensure, Result, WrapErr};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, warn, Level};
use uno_engine::{
    constants::{DEFAULT_CARDS_PER_PLAYER, DEFAULT_TARGET_SCORE},
    error::UnoError,
    game::{Game, GameConfig},
    random::{RngRandomizer, RngShuffler},
};

/// Plays a full UNO match between bots.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Comma separated player names
    #[arg(short, long, value_delimiter = ',', default_value = "Ada,Grace,Linus,Ken")]
    players: Vec<String>,

    #[arg(short, long, default_value_t = DEFAULT_TARGET_SCORE)]
    target_score: u32,

    #[arg(short, long, default_value_t = DEFAULT_CARDS_PER_PLAYER)]
    cards_per_player: usize,

    /// Seed for shuffling, dealer picks and bot decisions. Random if absent.
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 100_000)]
    max_turns: usize,

    /// Probability that a bot forgets to call UNO
    #[arg(long, default_value_t = 0.1)]
    forget_uno: f64,

    /// Writes the final game snapshot as JSON to this file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    ensure!(
        (0.0..=1.0).contains(&args.forget_uno),
        "--forget-uno must be between 0 and 1, got {}",
        args.forget_uno
    );

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, players = ?args.players, "starting match");

    let config = GameConfig {
        players: args.players,
        target_score: args.target_score,
        cards_per_player: args.cards_per_player,
    };
    let mut game = Game::new(
        config,
        RngShuffler::new(StdRng::seed_from_u64(seed)),
        RngRandomizer::new(StdRng::seed_from_u64(seed.wrapping_add(1))),
    )?;
    let mut bot = Bot::new(StdRng::seed_from_u64(seed.wrapping_add(2)), args.forget_uno);

    let mut turns = 0;
    while !game.is_over() && turns < args.max_turns {
        match bot.take_turn(&mut game) {
            Ok(()) => {}
            Err(UnoError::DeckExhausted) => {
                warn!(turns, "no cards left to draw, stopping");
                break;
            }
            Err(error) => return Err(error).wrap_err_with(|| format!("turn {turns} failed")),
        }
        turns += 1;
    }

    if !game.is_over() {
        warn!(turns, "match stopped before anyone reached the target");
    }

    for (name, score) in game.players().iter().zip(game.scores()) {
        println!("{name}: {score}");
    }
    if let Some(winner) = game.winner() {
        println!("Winner: {}", game.player(winner)?);
    }

    if let Some(path) = args.snapshot {
        let json = game.to_snapshot().to_json()?;
        fs::write(&path, json)
            .wrap_err_with(|| format!("could not write snapshot to {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}
