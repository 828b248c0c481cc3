//! Terminal driver for the sf_core match engine.
//!
//! Owns everything the engine deliberately does not: pacing between
//! plays, printing the log, and collecting the user's answer when the
//! engine suspends for a decision.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sf_core::{MatchConfig, MatchEngine, MatchPlan, PendingChoice, Team};

#[derive(Parser)]
#[command(name = "sf_cli")]
#[command(about = "Run a play-by-play street football match", long_about = None)]
struct Cli {
    /// Home roster JSON file
    home: PathBuf,

    /// Away roster JSON file
    away: PathBuf,

    /// RNG seed; the same seed replays the same match
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Total plays in the match
    #[arg(long, default_value_t = 12)]
    plays: u32,

    /// Pause between plays in milliseconds
    #[arg(long, default_value_t = 700)]
    delay_ms: u64,

    /// Answer decision gates with their first option instead of prompting
    #[arg(long)]
    auto: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let home_team = load_team(&cli.home)?;
    let away_team = load_team(&cli.away)?;
    println!("{} vs {}", home_team.name, away_team.name);

    let config = MatchConfig { match_length: cli.plays, seed: cli.seed, ..Default::default() };
    let mut engine = MatchEngine::new(MatchPlan { home_team, away_team, config })?;

    // Ratings summary and any seeded pre-match events.
    for line in engine.log() {
        println!("{line}");
    }

    loop {
        let feed = engine.next_play();
        if let Some(choice) = &feed.pending_choice {
            let picked = if cli.auto {
                choice.options.first().context("decision gate offers no options")?.id.clone()
            } else {
                prompt(choice)?
            };
            engine.apply_choice(&picked)?;
            if let Some(line) = engine.log().last() {
                println!("{line}");
            }
            continue;
        }

        println!("{}", feed.log_line);
        if feed.finished {
            break;
        }
        thread::sleep(Duration::from_millis(cli.delay_ms));
    }

    let score = engine.score();
    println!("Final score: {} - {}", score.home, score.away);
    Ok(())
}

fn load_team(path: &Path) -> Result<Team> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading roster {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing roster {}", path.display()))
}

fn prompt(choice: &PendingChoice) -> Result<String> {
    println!("🗳️ {} — {}", choice.title, choice.description);
    for (i, option) in choice.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option.label);
    }
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut buf = String::new();
        stdin.lock().read_line(&mut buf).context("reading choice")?;
        if let Ok(n) = buf.trim().parse::<usize>() {
            if (1..=choice.options.len()).contains(&n) {
                return Ok(choice.options[n - 1].id.clone());
            }
        }
        println!("Pick a number between 1 and {}", choice.options.len());
    }
}
