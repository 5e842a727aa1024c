use serde::Deserialize;
use std::{env, path::PathBuf};

use thiserror::Error;

use bingo_types::{PendingSize, UniverseSize, ui::UiOptions};

#[derive(Debug, Default, Deserialize)]
pub struct BingoConfig {
    pub app: Option<AppConfig>,
    pub draw: Option<DrawConfig>,
    pub speech: Option<SpeechConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for markers and borders.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct DrawConfig {
    /// Initial universe size. Resolved the same way as a reset, so `0` means
    /// the default and out-of-range values clamp.
    pub size: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpeechConfig {
    /// Start with the announcer switched on.
    #[serde(default)]
    pub enabled: bool,
    /// TTS program to run instead of auto-detection.
    pub command: Option<String>,
    /// Extra arguments placed before the spoken text.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Startup settings resolved from config and environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppSettings {
    pub ui: UiOptions,
    pub size: UniverseSize,
    pub announce: bool,
    pub speech_command: Option<String>,
    pub speech_args: Vec<String>,
}

impl AppSettings {
    #[must_use]
    pub fn from_config(config: Option<&BingoConfig>) -> Self {
        let app = config.and_then(|c| c.app.as_ref());
        let ui = UiOptions {
            ascii_only: app.is_some_and(|a| a.ascii_only),
            high_contrast: app.is_some_and(|a| a.high_contrast),
        };

        let size = config
            .and_then(|c| c.draw.as_ref())
            .map(|d| PendingSize::new(d.size).resolve())
            .unwrap_or_default();

        let speech = config.and_then(|c| c.speech.as_ref());
        let announce = announce_from_env().unwrap_or_else(|| speech.is_some_and(|s| s.enabled));

        Self {
            ui,
            size,
            announce,
            speech_command: speech.and_then(|s| s.command.clone()),
            speech_args: speech.map(|s| s.args.clone()).unwrap_or_default(),
        }
    }
}

fn announce_from_env() -> Option<bool> {
    env::var("BINGO_ANNOUNCE")
        .ok()
        .and_then(|value| parse_flag(&value))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl BingoConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(path),
            None => Ok(None),
        }
    }

    /// Missing file is not an error; it means "all defaults".
    pub fn load_from(path: PathBuf) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                Ok(Some(config))
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

/// `BINGO_CONFIG` wins over `~/.bingo/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("BINGO_CONFIG")
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".bingo").join("config.toml"))
}
