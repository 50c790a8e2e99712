//! Desktop window for the recommender.
//!
//! Pure view code: every click is forwarded to a [`Controller`] transition and
//! any [`Notice`] it returns is shown as a modal dialog. The event loop runs
//! one action to completion per frame, so no locking is needed.

use crate::config::RuntimeConfig;
use crate::player::{AudioBackend, PlaybackState, Player, RodioBackend};
use crate::recommender::Recommender;
use crate::session::{Controller, Notice, NoticeKind};
use anyhow::Result;
use eframe::egui;
use log::info;

const RESULTS_PLACEHOLDER: &str = "Recommended Songs will appear here.";

/// Form contents plus the controller behind them.
pub struct RecommenderApp<B: AudioBackend> {
    controller: Controller<B>,
    genre: String,
    tempo: String,
    energy: String,
    notice: Option<Notice>,
}

impl<B: AudioBackend> RecommenderApp<B> {
    pub fn new(controller: Controller<B>) -> Self {
        Self {
            controller,
            genre: String::new(),
            tempo: String::new(),
            energy: String::new(),
            notice: None,
        }
    }

    /// Text of the read-only results label.
    pub fn results_text(&self) -> String {
        match self.controller.session() {
            Some(session) => format!("Recommended Songs:\n{}", session.songs().join("\n")),
            None => RESULTS_PLACEHOLDER.to_string(),
        }
    }

    fn status_text(&self) -> Option<String> {
        match self.controller.playback() {
            PlaybackState::Stopped => None,
            PlaybackState::Playing(song) => Some(format!("Now playing: {song}")),
            PlaybackState::Paused(song) => Some(format!("Paused: {song}")),
        }
    }

    fn form(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label("Enter Genre (e.g., Pop, Rock, Jazz):");
            ui.text_edit_singleline(&mut self.genre);
            ui.add_space(5.0);

            ui.label("Enter Tempo (BPM):");
            ui.text_edit_singleline(&mut self.tempo);
            ui.add_space(5.0);

            ui.label("Enter Energy (0 to 1):");
            ui.text_edit_singleline(&mut self.energy);
            ui.add_space(10.0);

            if ui.button("Get Recommendations").clicked() {
                self.notice =
                    self.controller
                        .get_recommendations(&self.genre, &self.tempo, &self.energy);
            }
            ui.add_space(10.0);

            let enabled = self.controller.transport_enabled();
            if ui.add_enabled(enabled, egui::Button::new("Play")).clicked() {
                self.notice = self.controller.play();
            }
            if ui.add_enabled(enabled, egui::Button::new("Pause")).clicked() {
                self.controller.pause();
            }
            if ui.add_enabled(enabled, egui::Button::new("Resume")).clicked() {
                self.controller.resume();
            }
            if ui.add_enabled(enabled, egui::Button::new("Next")).clicked() {
                self.notice = self.controller.next();
            }
            ui.add_space(10.0);

            ui.label(self.results_text());
            if let Some(status) = self.status_text() {
                ui.add_space(5.0);
                ui.weak(status);
            }
        });
    }

    fn notice_dialog(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(notice.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let message = notice.message();
                let error_color = ui.visuals().error_fg_color;
                match notice.kind() {
                    NoticeKind::Error => ui.colored_label(error_color, message),
                    NoticeKind::Info => ui.label(message),
                };
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notice = None;
        }
    }
}

impl<B: AudioBackend> eframe::App for RecommenderApp<B> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();

        let modal_open = self.notice.is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| self.form(ui));
        });
        self.notice_dialog(ctx);

        // Wake up to notice the end of the song.
        if matches!(self.controller.playback(), PlaybackState::Playing(_)) {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }
}

impl<B: AudioBackend> Drop for RecommenderApp<B> {
    fn drop(&mut self) {
        self.controller.stop();
    }
}

/// Opens the window and blocks until it is closed.
pub fn run(config: &RuntimeConfig) -> Result<()> {
    info!("Opening window, music from {}", config.music_dir.display());

    let controller = Controller::new(
        Recommender::default(),
        Player::new(RodioBackend::new(), config.music_dir.clone()),
    );
    let app = RecommenderApp::new(controller);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([380.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("Failed to open window: {e}"))?;

    info!("Window closed");
    Ok(())
}
