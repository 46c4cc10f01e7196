//! Pinfall entry point
//!
//! Runs one headless game and prints a summary.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;

use pinfall::{GameSession, HighScores, Settings};

#[derive(Debug, Parser)]
#[command(name = "pinfall", about = "Play a headless Pinfall run")]
struct Args {
    /// Run seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Settings JSON file (built-in defaults if omitted)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// High score JSON file to record the run in
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Stop after this many simulation ticks
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Pinfall (native) starting...");

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut session = GameSession::new(settings, seed)?;
    let summary = session.run(args.max_ticks)?;

    println!("seed:           {}", summary.seed);
    println!(
        "result:         {}",
        match (summary.completed, summary.victory) {
            (false, _) => "stopped at tick limit",
            (true, true) => "victory",
            (true, false) => "game over",
        }
    );
    println!("score:          {}", summary.score);
    println!("stages cleared: {}", summary.stages_cleared);
    println!("rounds played:  {}", summary.rounds_played);
    println!("pins knocked:   {}", summary.pins_knocked);
    println!("best combo:     {}", summary.best_combo);

    if let Some(path) = &args.scores {
        let mut scores = HighScores::load(path)?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        match scores.add_run(&summary, now) {
            Some(rank) => {
                scores.save(path)?;
                println!("new high score: rank {}", rank);
            }
            None => println!("no high score this time"),
        }
    }

    Ok(())
}
