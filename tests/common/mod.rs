//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bingo_engine::{Announcer, App, AppSettings, SilentAnnouncer, SpeechError};
use bingo_types::UniverseSize;

/// Seed used when a test does not care about the exact sequence.
pub const DEFAULT_SEED: u64 = 0x0B16_0B16;

/// What a [`SpyAnnouncer`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spoken {
    Text(String),
    Cancelled,
}

/// Announcer that records calls and pretends each utterance runs until cancelled.
#[derive(Debug, Default)]
pub struct SpyAnnouncer {
    log: Arc<Mutex<Vec<Spoken>>>,
    speaking: bool,
}

impl SpyAnnouncer {
    pub fn new() -> (Self, Arc<Mutex<Vec<Spoken>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                log: Arc::clone(&log),
                speaking: false,
            },
            log,
        )
    }
}

impl Announcer for SpyAnnouncer {
    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        self.log.lock().unwrap().push(Spoken::Text(text.to_string()));
        self.speaking = true;
        Ok(())
    }

    fn cancel(&mut self) {
        self.log.lock().unwrap().push(Spoken::Cancelled);
        self.speaking = false;
    }

    fn is_speaking(&mut self) -> bool {
        self.speaking
    }

    fn name(&self) -> &str {
        "spy"
    }
}

pub fn settings(size: i64) -> AppSettings {
    AppSettings {
        size: UniverseSize::clamped(size),
        ..AppSettings::default()
    }
}

/// App with a silent announcer and a fixed seed.
pub fn quiet_app(size: i64) -> App {
    App::with_seed(settings(size), Box::new(SilentAnnouncer), DEFAULT_SEED)
}

/// App wired to a [`SpyAnnouncer`]; returns the shared call log.
pub fn spied_app(size: i64) -> (App, Arc<Mutex<Vec<Spoken>>>) {
    let (spy, log) = SpyAnnouncer::new();
    (App::with_seed(settings(size), Box::new(spy), DEFAULT_SEED), log)
}

/// Replaces the size field text the way a user would: edit, clear, type, Enter.
pub fn enter_size(app: &mut App, text: &str) {
    app.begin_size_edit();
    while !app.size_input().text().is_empty() {
        app.size_input_backspace();
    }
    for c in text.chars() {
        app.size_input_push(c);
    }
    app.commit_size_edit();
}

/// Requests a reset and answers "yes".
pub fn reset_confirmed(app: &mut App) {
    app.request_reset();
    app.confirm();
}
