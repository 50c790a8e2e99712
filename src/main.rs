//! # Muse Recommender
//!
//! Type a genre, tempo and energy, get four similar songs from the built-in
//! catalog, and play them from the desktop window.
//!
//! ## Usage
//!
//! ```bash
//! # Open the window (songs are read from ./Song1.mp3 … ./Song11.mp3)
//! muse-recommender
//!
//! # Headless recommendations
//! muse-recommender recommend Pop 120 0.8
//! muse-recommender recommend Jazz 100 0.5 --json
//!
//! # Show the catalog
//! muse-recommender catalog
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use muse_recommender::catalog::Catalog;
use muse_recommender::recommender::Recommender;
use muse_recommender::{cli, completion, config, gui, session};

/// Main entry point for the application.
///
/// Initializes logging, parses command-line arguments, and routes commands.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug muse-recommender` - Enable debug logging
/// - `RUST_LOG=muse_recommender::player=debug muse-recommender` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config = config::RuntimeConfig::with_music_dir(args.music_dir)?;
    debug!("Runtime configuration: {}", config.to_json()?);

    match args.command.unwrap_or(cli::Command::Gui) {
        cli::Command::Gui => {
            gui::run(&config)?;
        }
        cli::Command::Recommend {
            genre,
            tempo,
            energy,
            json,
        } => {
            let query = session::parse_query(&genre, &tempo, &energy)?;
            info!("Headless recommendation for {query:?}");

            let recommender = Recommender::default();
            let picks = recommender.recommend(&query)?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&picks).context("Failed to encode recommendations")?
                );
            } else {
                for (rank, pick) in picks.iter().enumerate() {
                    println!(
                        "{}. {:<8} {:<5} tempo {:>6.1}  energy {:.2}  distance {:.3}",
                        rank + 1,
                        pick.entry.name,
                        pick.entry.genre,
                        pick.entry.tempo,
                        pick.entry.energy,
                        pick.distance
                    );
                }
            }
        }
        cli::Command::Catalog { json } => {
            let catalog = Catalog::builtin();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(catalog.entries())
                        .context("Failed to encode catalog")?
                );
            } else {
                for entry in catalog.iter() {
                    println!(
                        "{:<8} {:<5} tempo {:>6.1}  energy {:.2}",
                        entry.name, entry.genre, entry.tempo, entry.energy
                    );
                }
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
