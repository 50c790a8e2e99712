//! # Player Module
//!
//! Playback control for the single active song. Decoding and audio output are
//! delegated to an [`AudioBackend`]; [`Player`] owns that backend and tracks
//! which song, if any, the stream currently belongs to.
//!
//! Songs are addressed by name and resolved to `{music_dir}/{name}.mp3`.

use crate::error::{Error, Result};
use log::{debug, info, warn};
use path_absolutize::Absolutize;
use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Extension appended to a song name to find its audio file.
pub const AUDIO_EXTENSION: &str = "mp3";

/// The external audio collaborator.
///
/// Implementations hold exactly one output stream. `load_and_play` replaces
/// whatever was queued before.
#[cfg_attr(test, mockall::automock)]
pub trait AudioBackend {
    /// Loads the file at `path` and starts playing it immediately.
    ///
    /// The error string is shown to the user as the failure reason.
    fn load_and_play(&mut self, path: &Path) -> std::result::Result<(), String>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// True once the loaded song has played to the end, or nothing is loaded.
    fn is_finished(&self) -> bool;
}

/// What the player is doing right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing(String),
    Paused(String),
}

impl PlaybackState {
    /// The song the stream belongs to, unless stopped.
    pub fn song(&self) -> Option<&str> {
        match self {
            PlaybackState::Stopped => None,
            PlaybackState::Playing(song) | PlaybackState::Paused(song) => Some(song),
        }
    }
}

/// Owner of the single playback stream.
pub struct Player<B: AudioBackend> {
    backend: B,
    music_dir: PathBuf,
    state: PlaybackState,
}

impl<B: AudioBackend> Player<B> {
    pub fn new(backend: B, music_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            music_dir: music_dir.into(),
            state: PlaybackState::Stopped,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// True while a song is loaded, playing or paused.
    pub fn is_active(&self) -> bool {
        self.state != PlaybackState::Stopped
    }

    pub fn music_dir(&self) -> &Path {
        &self.music_dir
    }

    /// Where the audio file for `song` is expected.
    pub fn resolve(&self, song: &str) -> PathBuf {
        self.music_dir.join(format!("{song}.{AUDIO_EXTENSION}"))
    }

    /// Stops whatever is playing, then loads and starts `song`.
    ///
    /// # Errors
    ///
    /// [`Error::Playback`] if the file is missing or the backend refuses it.
    /// The player is left stopped in that case.
    pub fn play(&mut self, song: &str) -> Result<()> {
        if self.is_active() {
            self.backend.stop();
        }
        self.state = PlaybackState::Stopped;

        let path = self.resolve(song);
        if !path.is_file() {
            let shown = path
                .absolutize()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| path.display().to_string());
            warn!("Audio file for `{song}' not found at {shown}");
            return Err(Error::playback(song, format!("no such file: {shown}")));
        }

        self.backend.load_and_play(&path).map_err(|reason| {
            warn!("Backend failed to play `{song}': {reason}");
            Error::playback(song, reason)
        })?;

        info!("Now playing `{song}' from {}", path.display());
        self.state = PlaybackState::Playing(song.to_string());
        Ok(())
    }

    /// Notices a song that ended on its own and marks the player stopped.
    ///
    /// Returns true when the state changed. Paused songs are left alone.
    pub fn poll(&mut self) -> bool {
        let PlaybackState::Playing(song) = &self.state else {
            return false;
        };
        if !self.backend.is_finished() {
            return false;
        }
        info!("Finished playing `{song}'");
        self.state = PlaybackState::Stopped;
        true
    }

    /// Pauses the current song. No-op unless something is playing.
    pub fn pause(&mut self) {
        self.poll();
        if let PlaybackState::Playing(song) = &self.state {
            debug!("Pausing `{song}'");
            self.backend.pause();
            self.state = PlaybackState::Paused(song.clone());
        }
    }

    /// Resumes a paused song. No-op unless something is paused.
    pub fn resume(&mut self) {
        if let PlaybackState::Paused(song) = &self.state {
            debug!("Resuming `{song}'");
            self.backend.resume();
            self.state = PlaybackState::Playing(song.clone());
        }
    }

    /// Stops and unloads the current song. No-op when already stopped.
    pub fn stop(&mut self) {
        if let Some(song) = self.state.song() {
            debug!("Stopping `{song}'");
            self.backend.stop();
            self.state = PlaybackState::Stopped;
        }
    }
}

/// Real audio output through the default device.
///
/// The device is opened on the first `load_and_play`, so a machine without
/// audio output only fails when something is actually played.
#[derive(Default)]
pub struct RodioBackend {
    output: Option<Output>,
}

struct Output {
    // Dropping the stream silences the sink.
    _stream: OutputStream,
    sink: Sink,
}

impl RodioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn output(&mut self) -> std::result::Result<&Output, String> {
        if self.output.is_none() {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| format!("no audio output device: {e}"))?;
            let sink = Sink::try_new(&handle)
                .map_err(|e| format!("could not open audio sink: {e}"))?;
            info!("Opened default audio output");
            self.output = Some(Output {
                _stream: stream,
                sink,
            });
        }
        self.output
            .as_ref()
            .ok_or_else(|| "audio output unavailable".to_string())
    }
}

impl AudioBackend for RodioBackend {
    fn load_and_play(&mut self, path: &Path) -> std::result::Result<(), String> {
        let file = File::open(path).map_err(|e| e.to_string())?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| e.to_string())?;

        let output = self.output()?;
        output.sink.stop();
        output.sink.append(source);
        output.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(output) = &self.output {
            output.sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(output) = &self.output {
            output.sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(output) = &self.output {
            output.sink.stop();
        }
    }

    fn is_finished(&self) -> bool {
        self.output.as_ref().map_or(true, |output| output.sink.empty())
    }
}
