//! Song recommendations from a small built-in catalog, with a desktop player.
//!
//! Core modules:
//! - [`catalog`] - The fixed song table
//! - [`recommender`] - Nearest-neighbor ranking over tempo and energy
//! - [`player`] - Single-stream playback control over an audio backend
//! - [`session`] - The window's state machine (recommend, play, pause, resume, next)
//!
//! ### Supporting Modules
//!
//! - [`gui`] - egui window wired to the session controller
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`config`] - Runtime configuration
//! - [`error`] - Error taxonomy
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use muse_recommender::player::{Player, RodioBackend};
//! use muse_recommender::recommender::Recommender;
//! use muse_recommender::session::Controller;
//!
//! let mut controller = Controller::new(
//!     Recommender::default(),
//!     Player::new(RodioBackend::new(), "."),
//! );
//!
//! if let Some(notice) = controller.get_recommendations("Pop", "120", "0.8") {
//!     eprintln!("{}: {}", notice.title(), notice.message());
//! }
//! if let Some(notice) = controller.play() {
//!     eprintln!("{}: {}", notice.title(), notice.message());
//! }
//! ```
//!
//! ## Algorithm Details
//!
//! Every catalog row is a point in (tempo, energy) space. A request ranks all
//! rows by Euclidean distance to the requested point and returns the four
//! nearest, ties kept in catalog order. The features are not scaled, so tempo
//! differences dominate. Genre is accepted but ignored.
//!
//! ## Error Handling
//!
//! Library functions return [`error::Result`]. None of the errors are fatal:
//! the window turns them into a [`session::Notice`] and keeps running.

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod gui;
pub mod player;
pub mod recommender;
pub mod session;
