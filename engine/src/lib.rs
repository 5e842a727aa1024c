//! Bingo caller engine - draw state machine and orchestration.
//!
//! This crate contains the application state and business logic,
//! independent of any TUI framework.

mod config;
mod session;
mod speech;

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

pub use config::{AppConfig, AppSettings, BingoConfig, ConfigError, DrawConfig, SpeechConfig};
pub use session::{DrawOutcome, DrawSession, SessionSnapshot, SessionState};
pub use speech::{Announcer, CommandAnnouncer, SilentAnnouncer, SpeechError, resolve_announcer};

pub use bingo_types::ui::{InputMode, SizeInput, StatusKind, UiOptions};
pub use bingo_types::{BallNumber, PendingSize, UniverseSize};

/// How long a status message stays in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
struct StatusMessage {
    kind: StatusKind,
    text: String,
    posted_at: Instant,
}

/// Application state.
pub struct App {
    session: DrawSession,
    rng: StdRng,
    announce: bool,
    announcer: Box<dyn Announcer>,
    input_mode: InputMode,
    size_input: SizeInput,
    status: Option<StatusMessage>,
    ui_options: UiOptions,
    board_scroll: u16,
    should_quit: bool,
    /// Set once a speech problem was shown; cleared when the announcer is switched on.
    speech_warned: bool,
}

impl App {
    /// Builds the app from resolved settings, detecting a speech program.
    #[must_use]
    pub fn new(settings: AppSettings) -> Self {
        let announcer =
            resolve_announcer(settings.speech_command.as_deref(), settings.speech_args.clone());
        Self::from_parts(settings, announcer, StdRng::from_os_rng())
    }

    /// Builds the app around explicit collaborators. Tests inject a seeded RNG
    /// and a fake announcer here.
    #[must_use]
    pub fn from_parts(settings: AppSettings, announcer: Box<dyn Announcer>, rng: StdRng) -> Self {
        let mut app = Self {
            session: DrawSession::new(settings.size),
            rng,
            announce: settings.announce,
            announcer,
            input_mode: InputMode::Normal,
            size_input: SizeInput::new(settings.size.to_string()),
            status: None,
            ui_options: settings.ui,
            board_scroll: 0,
            should_quit: false,
            speech_warned: false,
        };
        if app.announce {
            app.warn_if_no_speech();
        }
        app
    }

    #[must_use]
    pub fn with_seed(settings: AppSettings, announcer: Box<dyn Announcer>, seed: u64) -> Self {
        Self::from_parts(settings, announcer, StdRng::seed_from_u64(seed))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn session(&self) -> &DrawSession {
        &self.session
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    #[must_use]
    pub fn announce_enabled(&self) -> bool {
        self.announce
    }

    #[must_use]
    pub fn announcer_name(&self) -> &str {
        self.announcer.name()
    }

    #[must_use]
    pub fn size_input(&self) -> &SizeInput {
        &self.size_input
    }

    /// Size the next reset will use, before clamping.
    #[must_use]
    pub fn pending_size(&self) -> PendingSize {
        PendingSize::parse(self.size_input.text())
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    #[must_use]
    pub fn status_kind(&self) -> StatusKind {
        self.status.as_ref().map(|s| s.kind).unwrap_or_default()
    }

    #[must_use]
    pub fn board_scroll(&self) -> u16 {
        self.board_scroll
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Draws the next number and announces it when the announcer is on.
    pub fn draw_number(&mut self) -> DrawOutcome {
        let outcome = self.session.draw(&mut self.rng);
        match outcome {
            DrawOutcome::Drawn(ball) => {
                if self.announce {
                    self.announce_number(ball);
                }
            }
            DrawOutcome::Exhausted => {
                self.set_status(StatusKind::Info, "All numbers have been drawn");
            }
        }
        outcome
    }

    fn announce_number(&mut self, ball: BallNumber) {
        // Latest draw wins: never let two utterances overlap.
        if self.announcer.is_speaking() {
            self.announcer.cancel();
        }
        if !self.announcer.is_available() {
            return;
        }
        if let Err(err) = self.announcer.speak(&ball.get().to_string()) {
            tracing::warn!(number = %ball, "Announcement failed: {err}");
            self.warn_speech(&err);
        }
    }

    /// Shows a speech problem once per switch-on.
    fn warn_speech(&mut self, err: &SpeechError) {
        if !self.speech_warned {
            self.speech_warned = true;
            self.set_status(StatusKind::Warning, format!("Announcer: {err}"));
        }
    }

    fn warn_if_no_speech(&mut self) {
        if !self.announcer.is_available() {
            self.warn_speech(&SpeechError::NoCommand);
        }
    }

    /// Switches the announcer. Any utterance in progress is cut off either way.
    pub fn set_announce(&mut self, enabled: bool) {
        if self.announcer.is_speaking() {
            self.announcer.cancel();
        }
        self.announce = enabled;
        tracing::info!(enabled, "Announcer toggled");
        if enabled {
            self.speech_warned = false;
            self.warn_if_no_speech();
        }
    }

    pub fn toggle_announce(&mut self) {
        self.set_announce(!self.announce);
    }

    // ========================================================================
    // Reset and confirmations
    // ========================================================================

    /// Asks for confirmation; the session is untouched until [`App::confirm`].
    pub fn request_reset(&mut self) {
        if self.size_input.is_editing() {
            self.size_input.commit();
        }
        self.input_mode = InputMode::ConfirmReset;
    }

    /// Quits at once when nothing was drawn; otherwise asks first. A second
    /// request while the prompt is open quits.
    pub fn request_quit(&mut self) {
        if self.size_input.is_editing() {
            self.size_input.commit();
        }
        if self.input_mode == InputMode::ConfirmQuit || self.session.drawn_count() == 0 {
            self.should_quit = true;
            return;
        }
        self.input_mode = InputMode::ConfirmQuit;
    }

    /// Answers "yes" to the open prompt.
    pub fn confirm(&mut self) {
        match self.input_mode {
            InputMode::ConfirmReset => {
                self.input_mode = InputMode::Normal;
                self.reset();
            }
            InputMode::ConfirmQuit => {
                self.input_mode = InputMode::Normal;
                self.should_quit = true;
            }
            InputMode::Normal | InputMode::EditSize => {}
        }
    }

    /// Answers "no" to the open prompt. Nothing changes.
    pub fn dismiss(&mut self) {
        if self.input_mode.is_confirmation() {
            self.input_mode = InputMode::Normal;
        }
    }

    fn reset(&mut self) {
        let pending = self.pending_size();
        let snapshot = self.session.reset(pending);
        self.board_scroll = 0;
        tracing::info!(
            requested = ?pending.value(),
            size = snapshot.size.get(),
            "Draw restarted"
        );
        self.set_status(
            StatusKind::Success,
            format!("Draw restarted with {} numbers", snapshot.size),
        );
    }

    // ========================================================================
    // Size field
    // ========================================================================

    pub fn begin_size_edit(&mut self) {
        self.size_input.begin();
        self.input_mode = InputMode::EditSize;
    }

    pub fn size_input_push(&mut self, c: char) {
        self.size_input.push(c);
    }

    pub fn size_input_backspace(&mut self) {
        self.size_input.backspace();
    }

    pub fn commit_size_edit(&mut self) {
        self.size_input.commit();
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_size_edit(&mut self) {
        self.size_input.cancel();
        self.input_mode = InputMode::Normal;
    }

    // ========================================================================
    // Board scrolling
    // ========================================================================

    pub fn scroll_board_up(&mut self, rows: u16) {
        self.board_scroll = self.board_scroll.saturating_sub(rows);
    }

    pub fn scroll_board_down(&mut self, rows: u16) {
        self.board_scroll = self.board_scroll.saturating_add(rows);
    }

    /// Called by the renderer once it knows how many rows are hidden.
    pub fn clamp_board_scroll(&mut self, max: u16) {
        self.board_scroll = self.board_scroll.min(max);
    }

    // ========================================================================
    // Status and lifecycle
    // ========================================================================

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
            posted_at: Instant::now(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Shows that the config file was skipped and defaults are in use.
    pub fn report_config_error(&mut self, err: &ConfigError) {
        self.set_status(StatusKind::Error, format!("{err}; using defaults"));
    }

    /// Expires stale status messages. Called once per frame.
    pub fn tick(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|s| s.posted_at.elapsed() >= STATUS_TTL)
        {
            self.status = None;
        }
    }

    /// Stops any utterance before the process exits.
    pub fn shutdown(&mut self) {
        self.announcer.cancel();
    }
}
