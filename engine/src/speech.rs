//! Speech synthesis for announcing drawn numbers.
//!
//! Announcements are fire-and-forget: `speak` starts an utterance and returns
//! immediately. At most one utterance is alive at a time because callers
//! cancel before speaking again.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use thiserror::Error;

/// Programs tried, in order, when no command is configured.
const TTS_CANDIDATES: &[&str] = &["espeak-ng", "espeak", "spd-say", "say"];

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("no speech program available")]
    NoCommand,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Speaks short text aloud.
pub trait Announcer {
    /// Starts speaking `text` without waiting for it to finish.
    fn speak(&mut self, text: &str) -> Result<(), SpeechError>;

    /// Stops any in-progress utterance. No-op when idle.
    fn cancel(&mut self);

    fn is_speaking(&mut self) -> bool;

    /// Short name for status and logs.
    fn name(&self) -> &str;

    /// Whether `speak` can produce sound at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// Announcer used when no speech program is available. Never speaks.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn speak(&mut self, _text: &str) -> Result<(), SpeechError> {
        Err(SpeechError::NoCommand)
    }

    fn cancel(&mut self) {}

    fn is_speaking(&mut self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Extra handling for TTS clients that hand the text to a daemon and exit
/// before the utterance ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClientQuirks {
    /// Makes the client stay alive until the utterance finishes.
    wait_flag: Option<&'static str>,
    /// Run as `<program> <flag>` to stop whatever the daemon is saying.
    stop_flag: Option<&'static str>,
}

impl ClientQuirks {
    const NONE: Self = Self {
        wait_flag: None,
        stop_flag: None,
    };

    fn for_program(program: &Path) -> Self {
        match program.file_name().and_then(|name| name.to_str()) {
            Some("spd-say") => Self {
                wait_flag: Some("--wait"),
                stop_flag: Some("-C"),
            },
            _ => Self::NONE,
        }
    }
}

/// Speaks by running an external TTS program with the text as its last argument.
#[derive(Debug)]
pub struct CommandAnnouncer {
    program: PathBuf,
    args: Vec<String>,
    quirks: ClientQuirks,
    child: Option<Child>,
}

impl CommandAnnouncer {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        let program = program.into();
        Self {
            quirks: ClientQuirks::for_program(&program),
            program,
            args,
            child: None,
        }
    }

    /// Resolves the first TTS program found on `PATH`.
    #[must_use]
    pub fn detect() -> Option<Self> {
        TTS_CANDIDATES.iter().find_map(|name| {
            which::which(name)
                .ok()
                .map(|path| Self::new(path, Vec::new()))
        })
    }

    /// Resolves a configured program name through `PATH`, keeping it verbatim
    /// when lookup fails so the spawn error names what the user wrote.
    #[must_use]
    pub fn from_command(command: &str, args: Vec<String>) -> Self {
        let program = which::which(command).unwrap_or_else(|_| PathBuf::from(command));
        Self::new(program, args)
    }

    fn command_args(&self, text: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(self.args.len() + 2);
        if let Some(flag) = self.quirks.wait_flag
            && !self.args.iter().any(|arg| arg == flag)
        {
            args.push(flag.to_string());
        }
        args.extend(self.args.iter().cloned());
        args.push(text.to_string());
        args
    }

    /// Kills the running client and, for daemon-backed clients, tells the
    /// daemon to drop the utterance too.
    fn halt(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        let _ = child.kill();
        let _ = child.wait();

        if let Some(flag) = self.quirks.stop_flag {
            let stopped = Command::new(&self.program)
                .arg(flag)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if let Err(err) = stopped {
                tracing::warn!(program = %self.program.display(), "Failed to stop speech: {err}");
            }
        }
    }
}

impl Announcer for CommandAnnouncer {
    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        self.halt();

        let child = Command::new(&self.program)
            .args(self.command_args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if self.child.is_some() {
            tracing::debug!(program = %self.program.display(), "Cancelling utterance");
        }
        self.halt();
    }

    fn is_speaking(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(_)) | Err(_) => {
                self.child = None;
                false
            }
        }
    }

    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("speech")
    }
}

impl Drop for CommandAnnouncer {
    fn drop(&mut self) {
        self.halt();
    }
}

/// Picks the announcer from an optional configured command, falling back to
/// detection and then to silence.
#[must_use]
pub fn resolve_announcer(command: Option<&str>, args: Vec<String>) -> Box<dyn Announcer> {
    if let Some(command) = command.map(str::trim).filter(|c| !c.is_empty()) {
        let announcer = CommandAnnouncer::from_command(command, args);
        tracing::info!(program = %announcer.program.display(), "Using configured speech program");
        return Box::new(announcer);
    }

    match CommandAnnouncer::detect() {
        Some(mut announcer) => {
            announcer.args = args;
            tracing::info!(program = %announcer.program.display(), "Detected speech program");
            Box::new(announcer)
        }
        None => {
            tracing::info!("No speech program found; announcements disabled");
            Box::new(SilentAnnouncer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_announcer_never_speaks() {
        let mut announcer = SilentAnnouncer;
        assert!(matches!(announcer.speak("7"), Err(SpeechError::NoCommand)));
        assert!(!announcer.is_speaking());
        announcer.cancel();
        assert_eq!(announcer.name(), "none");
        assert!(!announcer.is_available());
    }

    #[test]
    fn missing_program_reports_spawn_error() {
        let mut announcer = CommandAnnouncer::new("/nonexistent/bingo-tts-program", Vec::new());
        let err = announcer.speak("12").unwrap_err();
        match err {
            SpeechError::Spawn { program, .. } => {
                assert!(program.contains("bingo-tts-program"));
            }
            SpeechError::NoCommand => panic!("expected spawn error"),
        }
        assert!(!announcer.is_speaking());
    }

    #[test]
    fn name_is_program_file_name() {
        let announcer = CommandAnnouncer::new("/usr/bin/espeak-ng", Vec::new());
        assert_eq!(announcer.name(), "espeak-ng");
    }

    #[cfg(unix)]
    #[test]
    fn cancel_stops_running_child() {
        // `sleep 5` stands in for a long utterance.
        let Ok(sleep) = which::which("sleep") else {
            return;
        };
        let mut announcer = CommandAnnouncer::new(sleep, Vec::new());
        announcer.speak("5").unwrap();
        assert!(announcer.is_speaking());

        announcer.cancel();
        assert!(!announcer.is_speaking());
    }

    #[cfg(unix)]
    #[test]
    fn finished_child_is_not_speaking() {
        let Ok(program) = which::which("true") else {
            return;
        };
        let mut announcer = CommandAnnouncer::new(program, Vec::new());
        announcer.speak("1").unwrap();
        if let Some(child) = announcer.child.as_mut() {
            let _ = child.wait();
        }
        assert!(!announcer.is_speaking());
    }

    #[test]
    fn spd_say_gets_wait_flag_once() {
        let announcer = CommandAnnouncer::new("/usr/bin/spd-say", Vec::new());
        assert_eq!(announcer.command_args("3"), vec!["--wait", "3"]);

        let args = vec!["--wait".to_string(), "-r".to_string(), "10".to_string()];
        let announcer = CommandAnnouncer::new("/usr/bin/spd-say", args);
        assert_eq!(announcer.command_args("3"), vec!["--wait", "-r", "10", "3"]);

        let announcer = CommandAnnouncer::new("/usr/bin/espeak-ng", Vec::new());
        assert_eq!(announcer.command_args("3"), vec!["3"]);
        assert!(announcer.is_available());
    }

    /// Stand-in for `spd-say`: hands off and exits at once unless `--wait` is
    /// given, and records `-C` calls.
    #[cfg(unix)]
    const DAEMON_CLIENT_STUB: &str = r#"#!/bin/sh
dir=$(dirname "$0")
if [ "$1" = "-C" ]; then
    : > "$dir/stopped"
    exit 0
fi
echo "$@" > "$dir/args"
if [ "$1" = "--wait" ]; then
    sleep 5
fi
"#;

    #[cfg(unix)]
    #[test]
    fn daemon_client_stays_alive_and_cancel_stops_daemon() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::{Duration, Instant};

        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("spd-say");
        std::fs::write(&program, DAEMON_CLIENT_STUB).unwrap();
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut announcer = CommandAnnouncer::new(&program, Vec::new());
        announcer.speak("42").unwrap();

        let args_file = dir.path().join("args");
        let deadline = Instant::now() + Duration::from_secs(3);
        while !args_file.exists() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(std::fs::read_to_string(&args_file).unwrap().trim(), "--wait 42");

        std::thread::sleep(Duration::from_millis(200));
        assert!(announcer.is_speaking());

        announcer.cancel();
        assert!(!announcer.is_speaking());
        assert!(dir.path().join("stopped").exists());
    }

    #[test]
    fn blank_configured_command_falls_back_to_detection() {
        let announcer = resolve_announcer(Some("   "), Vec::new());
        let name = announcer.name().to_string();
        assert!(name == "none" || TTS_CANDIDATES.iter().any(|c| name.starts_with(c)));
    }
}
