//! # Command-Line Interface Module
//!
//! Clap derive definitions for the binary. Without a subcommand the desktop
//! window opens, which is what most users want; the other commands expose
//! the recommender headlessly.
//!
//! ## Examples
//!
//! ```bash
//! muse-recommender                                  # open the window
//! muse-recommender --music-dir ~/Music/demo gui
//! muse-recommender recommend Pop 120 0.8
//! muse-recommender catalog --json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "muse-recommender")]
#[command(about = "Muse Recommender: nearest-neighbor song suggestions with a small desktop player")]
#[command(version)]
pub struct Args {
    /// Directory holding the `{song}.mp3` files
    #[arg(long, global = true, env = "MUSE_MUSIC_DIR", default_value = ".")]
    pub music_dir: PathBuf,

    /// The subcommand to execute; opens the window when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Open the recommendation window
    Gui,

    /// Print recommendations for a genre, tempo and energy
    ///
    /// Uses the same validation as the window: tempo and energy must be
    /// finite numbers. Genre is accepted but does not change the result.
    Recommend {
        /// Genre, e.g. Pop, Rock, Jazz
        genre: String,

        /// Tempo in beats per minute
        #[arg(allow_hyphen_values = true)]
        tempo: String,

        /// Energy, conventionally between 0 and 1
        #[arg(allow_hyphen_values = true)]
        energy: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the built-in song catalog
    Catalog {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Usage: muse-recommender completion bash > ~/.local/share/bash-completion/completions/muse-recommender
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
