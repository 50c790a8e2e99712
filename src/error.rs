//! Error taxonomy shared by the library modules.
//!
//! Every variant is recoverable: the window reports it to the user and keeps
//! running. Only the binary wraps failures in [`anyhow`] for fatal start-up
//! problems.

use thiserror::Error;

/// Central error type for the muse-recommender library.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A numeric form field could not be parsed as a finite number.
    #[error("invalid value {value:?} for {field}: expected a number")]
    InvalidInput { field: &'static str, value: String },

    /// The audio collaborator could not load or start a song.
    #[error("could not play {song}: {reason}")]
    Playback { song: String, reason: String },

    /// The catalog holds fewer rows than the neighbor count asks for.
    #[error("catalog has {available} songs but {requested} recommendations were requested")]
    InsufficientData { requested: usize, available: usize },

    #[error("song {0:?} appears more than once in the catalog")]
    DuplicateSong(String),
}

impl Error {
    pub(crate) fn playback(song: &str, reason: impl ToString) -> Self {
        Error::Playback {
            song: song.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
