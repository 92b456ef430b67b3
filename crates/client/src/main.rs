//! `tcg` binary.
//!
//! Plays a seeded match between two automatic providers and prints the
//! outcome, or replays a recorded match and checks it.
//!
//! ```bash
//! # Random play with the built-in decks
//! cargo run -p tcg-client -- play --seed 7
//!
//! # Scripted first player, recorded to a file
//! cargo run -p tcg-client -- play --first-script opening.txt --record match.json
//!
//! # Verify a record
//! cargo run -p tcg-client -- replay match.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tcg_core::{Deck, GameState, Match, Outcome};
use tcg_runtime::{
    MatchRecord, MatchRunner, RandomProvider, ResponseProvider, RunStatus, RuntimeConfig,
    ScriptedProvider,
};

const SAMPLE_DECKS: [&str; 2] = [
    include_str!("../decks/hydro_dendro.deck"),
    include_str!("../decks/mobs.deck"),
];
/// Copies the sample decks need per card.
const SAMPLE_MAX_COPIES: usize = 4;

/// Two-player card battle simulator
#[derive(Parser)]
#[command(name = "tcg")]
#[command(about = "Deterministic card battle simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play one match between automatic providers
    Play(PlayArgs),

    /// Re-run a recorded match and check its snapshot digests
    Replay {
        /// Record written by `play --record`
        path: PathBuf,
    },
}

#[derive(Parser)]
struct PlayArgs {
    /// Match seed (overrides TCG_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Round limit (overrides TCG_MAX_ROUNDS)
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Deck file of the first player
    #[arg(long, requires = "second_deck")]
    first_deck: Option<PathBuf>,

    /// Deck file of the second player
    #[arg(long, requires = "first_deck")]
    second_deck: Option<PathBuf>,

    /// Command script for the first player (random play otherwise)
    #[arg(long)]
    first_script: Option<PathBuf>,

    /// Command script for the second player (random play otherwise)
    #[arg(long)]
    second_script: Option<PathBuf>,

    /// Write the match record here (overrides TCG_RECORD_PATH)
    #[arg(long)]
    record: Option<PathBuf>,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    setup_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Play(args) => play(args),
        Command::Replay { path } => replay(&path),
    }
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn play(args: PlayArgs) -> Result<()> {
    let mut config = RuntimeConfig::from_env();
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(rounds) = args.max_rounds {
        config.max_rounds = rounds.max(1);
    }
    if let Some(path) = args.record {
        config.record_path = Some(path);
    }

    let decks = match (&args.first_deck, &args.second_deck) {
        (Some(first), Some(second)) => [read_deck(first)?, read_deck(second)?],
        _ => {
            config.max_same_card = config.max_same_card.max(SAMPLE_MAX_COPIES);
            [
                parse_deck(SAMPLE_DECKS[0], "hydro_dendro")?,
                parse_deck(SAMPLE_DECKS[1], "mobs")?,
            ]
        }
    };

    let mut game = Match::new(config.match_config(), config.seed);
    game.set_decks(decks);
    tracing::info!(seed = game.seed(), "starting match");

    let seed = game.seed();
    let first = provider(args.first_script.as_deref(), seed)?;
    let second = provider(args.second_script.as_deref(), seed.wrapping_add(1))?;
    let mut runner = MatchRunner::new(first, second).with_max_steps(config.max_steps);
    let status = runner.run(&mut game)?;

    print_summary(game.state(), status);

    if let Some(path) = &config.record_path {
        let record = MatchRecord::capture(&game, runner.responses())
            .context("capturing the match record")?;
        record
            .save(path)
            .with_context(|| format!("writing record to {}", path.display()))?;
        println!("record written to {}", path.display());
    }
    Ok(())
}

fn replay(path: &Path) -> Result<()> {
    let record = MatchRecord::load(path)
        .with_context(|| format!("reading record from {}", path.display()))?;
    let game = record.replay()?;
    println!(
        "replay of seed {} matched {} snapshots",
        record.seed,
        game.history().len()
    );
    if let Some(outcome) = game.outcome() {
        println!("outcome: {}", describe(outcome));
    }
    Ok(())
}

fn provider(script: Option<&Path>, seed: u64) -> Result<Box<dyn ResponseProvider>> {
    let Some(path) = script else {
        return Ok(Box::new(RandomProvider::new(seed)));
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    Ok(Box::new(ScriptedProvider::new(&text)?))
}

fn read_deck(path: &Path) -> Result<Deck> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading deck {}", path.display()))?;
    parse_deck(&text, &path.display().to_string())
}

fn parse_deck(text: &str, origin: &str) -> Result<Deck> {
    text.parse::<Deck>()
        .with_context(|| format!("parsing deck {origin}"))
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Winner(player) => format!("player {player} wins"),
        Outcome::Draw => "draw".to_string(),
    }
}

fn print_summary(state: &GameState, status: RunStatus) {
    match status {
        RunStatus::Finished(outcome) => {
            println!("round {}: {}", state.round, describe(outcome));
        }
        RunStatus::Stalled { player } => {
            println!("round {}: stopped waiting for player {player}", state.round);
        }
    }
    for table in &state.tables {
        let characters: Vec<String> = table
            .characters
            .iter()
            .map(|character| format!("{} {}/{}", character.name(), character.hp, character.max_hp))
            .collect();
        println!("  player {}: {}", table.player, characters.join(", "));
    }
}
