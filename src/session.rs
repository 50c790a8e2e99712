//! # Session Module
//!
//! The window's behavior as an explicit state machine, independent of any
//! widget toolkit. [`Controller`] owns the recommender, the player and the
//! current [`AppState`]; every user action is one method call that runs to
//! completion and may hand back a [`Notice`] for the window to show.
//!
//! ```text
//!            GetRecommendations (ok)
//!   Idle ───────────────────────────▶ HasRecommendations ◀─┐
//!    │                                   │ Play/Pause/      │ GetRecommendations (ok)
//!    └─ bad input: Notice, stay          │ Resume/Next      │ resets index to 0
//!                                        └──────────────────┘
//! ```

use crate::error::{Error, Result};
use crate::player::{AudioBackend, PlaybackState, Player};
use crate::recommender::{Query, Recommender};
use log::{debug, info, warn};

/// Severity of a [`Notice`]; decides the dialog styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

/// A message the window shows modally after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Tempo or energy was not a number.
    InvalidInput,
    /// The recommendation request itself failed.
    RecommendationFailed(String),
    /// The named song could not be played.
    PlaybackFailed(String),
    /// Next was pressed on the last recommended song.
    EndOfList,
}

impl Notice {
    pub fn kind(&self) -> NoticeKind {
        match self {
            Notice::EndOfList => NoticeKind::Info,
            _ => NoticeKind::Error,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notice::InvalidInput => "Invalid Input",
            Notice::RecommendationFailed(_) | Notice::PlaybackFailed(_) => "Error",
            Notice::EndOfList => "End of Recommendations",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::InvalidInput => {
                "Please enter valid numeric values for Tempo and Energy.".to_string()
            }
            Notice::RecommendationFailed(reason) => {
                format!("Could not get recommendations: {reason}")
            }
            Notice::PlaybackFailed(message) => message.clone(),
            Notice::EndOfList => "No more songs to play.".to_string(),
        }
    }
}

impl From<Error> for Notice {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput { .. } => Notice::InvalidInput,
            Error::Playback { .. } => {
                let message = capitalize(&err.to_string());
                Notice::PlaybackFailed(message)
            }
            Error::InsufficientData { .. } | Error::DuplicateSong(_) => {
                Notice::RecommendationFailed(err.to_string())
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The recommended songs and which one the transport buttons act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSession {
    current_index: usize,
    recommended: Vec<String>,
}

impl PlaybackSession {
    /// Starts at the first song. Returns `None` for an empty list, since a
    /// session must always point at a valid song.
    pub fn new(recommended: Vec<String>) -> Option<Self> {
        if recommended.is_empty() {
            return None;
        }
        Some(Self {
            current_index: 0,
            recommended,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_song(&self) -> &str {
        &self.recommended[self.current_index]
    }

    pub fn songs(&self) -> &[String] {
        &self.recommended
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.recommended.len()
    }

    /// Moves to the next song; returns false and stays put at the end.
    fn advance(&mut self) -> bool {
        if self.has_next() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }
}

/// Window state: transport controls only exist with recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Idle,
    HasRecommendations(PlaybackSession),
}

/// Parses a numeric form field the way the window expects.
///
/// Surrounding whitespace is ignored and single underscores between digits
/// are accepted as separators (`1_000`, `0.8_5`). Non-finite values (`nan`,
/// `inf`) are rejected because no distance can be ranked against them.
///
/// # Errors
///
/// [`Error::InvalidInput`] naming `field`.
pub fn parse_number(field: &'static str, text: &str) -> Result<f64> {
    strip_digit_separators(text.trim())
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| Error::InvalidInput {
            field,
            value: text.to_string(),
        })
}

/// Drops every `_` that sits directly between two ASCII digits. Any other
/// underscore is kept so the parse fails on it.
fn strip_digit_separators(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(char::is_ascii_digit);
            !(c == '_' && between_digits)
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Builds a [`Query`] from the three raw form fields.
pub fn parse_query(genre: &str, tempo_text: &str, energy_text: &str) -> Result<Query> {
    let tempo = parse_number("tempo", tempo_text)?;
    let energy = parse_number("energy", energy_text)?;
    Ok(Query::new(genre.trim(), tempo, energy))
}

/// Drives recommendations and playback for one window.
pub struct Controller<B: AudioBackend> {
    recommender: Recommender,
    player: Player<B>,
    state: AppState,
}

impl<B: AudioBackend> Controller<B> {
    pub fn new(recommender: Recommender, player: Player<B>) -> Self {
        Self {
            recommender,
            player,
            state: AppState::Idle,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        match &self.state {
            AppState::Idle => None,
            AppState::HasRecommendations(session) => Some(session),
        }
    }

    /// Whether Play, Pause, Resume and Next should accept clicks.
    pub fn transport_enabled(&self) -> bool {
        self.session().is_some()
    }

    pub fn playback(&self) -> &PlaybackState {
        self.player.state()
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Parses the form, runs the recommender and starts a fresh session.
    ///
    /// On any failure the previous state, including an existing session, is
    /// kept untouched. Playback of an earlier song is not interrupted.
    pub fn get_recommendations(
        &mut self,
        genre: &str,
        tempo_text: &str,
        energy_text: &str,
    ) -> Option<Notice> {
        let names = match parse_query(genre, tempo_text, energy_text)
            .and_then(|query| self.recommender.recommend_names(&query))
        {
            Ok(names) => names,
            Err(err) => {
                warn!("Recommendation request rejected: {err}");
                return Some(err.into());
            }
        };

        info!("Recommended: {}", names.join(", "));
        match PlaybackSession::new(names) {
            Some(session) => self.state = AppState::HasRecommendations(session),
            None => debug!("Empty recommendation list, staying in {:?}", self.state),
        }
        None
    }

    /// Plays the current song of the session.
    pub fn play(&mut self) -> Option<Notice> {
        let AppState::HasRecommendations(session) = &self.state else {
            debug!("Play ignored without recommendations");
            return None;
        };
        let song = session.current_song().to_string();
        self.player.play(&song).err().map(Notice::from)
    }

    pub fn pause(&mut self) {
        if self.transport_enabled() {
            self.player.pause();
        }
    }

    pub fn resume(&mut self) {
        if self.transport_enabled() {
            self.player.resume();
        }
    }

    /// Stops the current song and plays the next recommendation.
    ///
    /// At the end of the list nothing changes and [`Notice::EndOfList`] is
    /// returned. The index advances even if the next song then fails to play.
    pub fn next(&mut self) -> Option<Notice> {
        let AppState::HasRecommendations(session) = &mut self.state else {
            debug!("Next ignored without recommendations");
            return None;
        };
        if !session.advance() {
            info!("Already at the last recommendation");
            return Some(Notice::EndOfList);
        }
        let song = session.current_song().to_string();

        self.player.stop();
        self.player.play(&song).err().map(Notice::from)
    }

    /// Picks up a song that ended on its own. Call once per frame.
    ///
    /// The session and its index are not touched; only the playback state.
    pub fn poll(&mut self) -> bool {
        self.player.poll()
    }

    /// Stops playback, e.g. when the window closes.
    pub fn stop(&mut self) {
        self.player.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::MockAudioBackend;
    use tempfile::TempDir;

    fn idle_controller(backend: MockAudioBackend, dir: &TempDir) -> Controller<MockAudioBackend> {
        Controller::new(Recommender::default(), Player::new(backend, dir.path()))
    }

    fn touch(dir: &TempDir, songs: &[&str]) {
        for song in songs {
            std::fs::File::create(dir.path().join(format!("{song}.mp3"))).unwrap();
        }
    }

    #[test]
    fn test_parse_number_accepts_padded_and_scientific() {
        assert_eq!(parse_number("tempo", " 120 ").unwrap(), 120.0);
        assert_eq!(parse_number("tempo", "1.2e2").unwrap(), 120.0);
        assert_eq!(parse_number("energy", "-0.5").unwrap(), -0.5);
    }

    #[test]
    fn test_parse_number_accepts_digit_separators() {
        assert_eq!(parse_number("tempo", "1_000").unwrap(), 1000.0);
        assert_eq!(parse_number("energy", "0.8_5").unwrap(), 0.85);
        assert_eq!(parse_number("tempo", " 1_2_0 ").unwrap(), 120.0);
    }

    #[test]
    fn test_parse_number_rejects_misplaced_separators() {
        for bad in ["_120", "120_", "1__20", "1_.5", "0._8"] {
            assert!(parse_number("tempo", bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_number_rejects_garbage_and_non_finite() {
        for bad in ["abc", "", "12bpm", "nan", "inf", "-inf"] {
            assert!(
                matches!(parse_number("tempo", bad), Err(Error::InvalidInput { field: "tempo", .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_starts_idle_with_transport_disabled() {
        let dir = TempDir::new().unwrap();
        let controller = idle_controller(MockAudioBackend::new(), &dir);
        assert_eq!(controller.state(), &AppState::Idle);
        assert!(!controller.transport_enabled());
    }

    #[test]
    fn test_get_recommendations_enters_session() {
        let dir = TempDir::new().unwrap();
        let mut controller = idle_controller(MockAudioBackend::new(), &dir);

        assert_eq!(controller.get_recommendations("Pop", "120", "0.8"), None);
        let session = controller.session().expect("session after recommending");
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_song(), "Song1");
        assert_eq!(session.songs().len(), 4);
        assert!(controller.transport_enabled());
    }

    #[test]
    fn test_invalid_input_keeps_previous_session() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Song9"]);
        let mut backend = MockAudioBackend::new();
        backend.expect_load_and_play().returning(|_| Ok(()));
        backend.expect_stop().return_const(());
        let mut controller = idle_controller(backend, &dir);

        controller.get_recommendations("Pop", "120", "0.8");
        assert_eq!(controller.next(), None);
        let before = controller.state().clone();

        assert_eq!(
            controller.get_recommendations("Pop", "abc", "0.8"),
            Some(Notice::InvalidInput)
        );
        assert_eq!(controller.state(), &before);
        assert_eq!(controller.session().unwrap().current_index(), 1);
    }

    #[test]
    fn test_invalid_input_while_idle_stays_idle() {
        let dir = TempDir::new().unwrap();
        let mut controller = idle_controller(MockAudioBackend::new(), &dir);
        assert_eq!(
            controller.get_recommendations("Jazz", "120", "loud"),
            Some(Notice::InvalidInput)
        );
        assert_eq!(controller.state(), &AppState::Idle);
    }

    #[test]
    fn test_new_recommendations_reset_index() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Song9"]);
        let mut backend = MockAudioBackend::new();
        backend.expect_load_and_play().returning(|_| Ok(()));
        backend.expect_stop().return_const(());
        let mut controller = idle_controller(backend, &dir);

        controller.get_recommendations("Pop", "120", "0.8");
        controller.next();
        controller.get_recommendations("Rock", "140", "0.6");

        let session = controller.session().unwrap();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_song(), "Song2");
    }

    #[test]
    fn test_play_missing_file_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut backend = MockAudioBackend::new();
        backend.expect_load_and_play().never();
        let mut controller = idle_controller(backend, &dir);

        controller.get_recommendations("Pop", "120", "0.8");
        let notice = controller.play().expect("missing file must be reported");

        assert_eq!(notice.kind(), NoticeKind::Error);
        assert_eq!(notice.title(), "Error");
        assert!(notice.message().starts_with("Could not play Song1"));
        assert_eq!(controller.playback(), &PlaybackState::Stopped);
        assert_eq!(controller.session().unwrap().current_song(), "Song1");
    }

    #[test]
    fn test_next_at_end_of_list() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Song1", "Song9", "Song7", "Song6"]);
        let mut backend = MockAudioBackend::new();
        backend.expect_load_and_play().returning(|_| Ok(()));
        backend.expect_stop().return_const(());
        let mut controller = idle_controller(backend, &dir);

        controller.get_recommendations("Pop", "120", "0.8");
        for _ in 0..3 {
            assert_eq!(controller.next(), None);
        }
        assert_eq!(controller.session().unwrap().current_index(), 3);

        let notice = controller.next();
        assert_eq!(notice, Some(Notice::EndOfList));
        assert_eq!(notice.unwrap().kind(), NoticeKind::Info);
        assert_eq!(controller.session().unwrap().current_index(), 3);
    }

    #[test]
    fn test_next_stops_before_playing() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Song1", "Song9"]);
        let mut seq = mockall::Sequence::new();
        let mut backend = MockAudioBackend::new();
        backend
            .expect_load_and_play()
            .withf(|path| path.ends_with("Song1.mp3"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        backend.expect_stop().times(1).in_sequence(&mut seq).return_const(());
        backend
            .expect_load_and_play()
            .withf(|path| path.ends_with("Song9.mp3"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let mut controller = idle_controller(backend, &dir);

        controller.get_recommendations("Pop", "120", "0.8");
        assert_eq!(controller.play(), None);
        assert_eq!(controller.next(), None);
        assert_eq!(controller.playback(), &PlaybackState::Playing("Song9".to_string()));
    }

    #[test]
    fn test_poll_after_song_ends_keeps_session() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["Song1"]);
        let mut backend = MockAudioBackend::new();
        backend.expect_load_and_play().returning(|_| Ok(()));
        backend.expect_is_finished().return_const(true);
        let mut controller = idle_controller(backend, &dir);

        controller.get_recommendations("Pop", "120", "0.8");
        assert_eq!(controller.play(), None);
        assert!(controller.poll());

        assert_eq!(controller.playback(), &PlaybackState::Stopped);
        assert_eq!(controller.session().unwrap().current_song(), "Song1");
        assert!(controller.transport_enabled());
        // Nothing left to notice.
        assert!(!controller.poll());
    }

    #[test]
    fn test_transport_ignored_while_idle() {
        let dir = TempDir::new().unwrap();
        let mut backend = MockAudioBackend::new();
        backend.expect_load_and_play().never();
        backend.expect_pause().never();
        backend.expect_resume().never();
        let mut controller = idle_controller(backend, &dir);

        assert_eq!(controller.play(), None);
        controller.pause();
        controller.resume();
        assert_eq!(controller.next(), None);
        assert_eq!(controller.state(), &AppState::Idle);
    }

    #[test]
    fn test_insufficient_data_is_reported() {
        use crate::catalog::{Catalog, CatalogEntry};

        let dir = TempDir::new().unwrap();
        let catalog = Catalog::from_entries(vec![CatalogEntry::new("Only", "Pop", 120.0, 0.8)]).unwrap();
        let mut controller = Controller::new(
            Recommender::new(catalog),
            Player::new(MockAudioBackend::new(), dir.path()),
        );

        let notice = controller.get_recommendations("Pop", "120", "0.8").unwrap();
        assert!(matches!(notice, Notice::RecommendationFailed(_)));
        assert_eq!(controller.state(), &AppState::Idle);
    }

    #[test]
    fn test_session_rejects_empty_list() {
        assert!(PlaybackSession::new(Vec::new()).is_none());
    }
}
