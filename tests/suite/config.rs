//! Config file loading into startup settings.

use std::fs;

use bingo_engine::{App, AppSettings, BingoConfig, ConfigError, SilentAnnouncer};
use tempfile::tempdir;

#[test]
fn config_file_drives_initial_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[app]\nascii_only = true\n\n[draw]\nsize = 1500\n\n[speech]\nargs = [\"-v\", \"pt\"]\n",
    )
    .unwrap();

    let config = BingoConfig::load_from(path).unwrap();
    let settings = AppSettings::from_config(config.as_ref());
    assert_eq!(settings.size.get(), 999);
    assert!(settings.ui.ascii_only);
    assert_eq!(settings.speech_args, vec!["-v".to_string(), "pt".to_string()]);

    let app = App::with_seed(settings, Box::new(SilentAnnouncer), 1);
    assert_eq!(app.session().size().get(), 999);
    assert_eq!(app.size_input().text(), "999");
}

#[test]
fn unreadable_config_is_an_error_with_path() {
    let dir = tempdir().unwrap();
    // A directory where a file is expected cannot be read as a string.
    let path = dir.path().join("config.toml");
    fs::create_dir(&path).unwrap();

    let err = BingoConfig::load_from(path.clone()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert_eq!(err.path(), &path);
}
