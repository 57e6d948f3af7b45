use super::error::SettingsError;
use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::logging::LogLevel;
use crate::player::AudioChannel;
use crate::playlist::PlaylistMode;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_cadence_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", "/tmp/cadence-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/cadence-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("cadence")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("cadence")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_sane() {
    let s = Settings::default();
    assert_eq!(s.player.volume, 75);
    assert_eq!(s.player.speed_rate, 1.0);
    assert!(!s.player.mute);
    assert_eq!(s.player.audio_channel, AudioChannel::Auto);
    assert_eq!(s.playlist.mode, PlaylistMode::Loop);
    assert!(!s.playlist.debug);
    assert_eq!(s.logging.allowed_levels, LogLevel::ALL.to_vec());
    assert_eq!(s.logging.output, LogOutput::Terminal);
    assert_eq!(s.logging.log_dir, std::path::PathBuf::from("./log"));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_mode_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
volume = 40
speed_rate = 1.5
mute = true
audio_channel = "stereo"

[playlist]
mode = "repeat-one"
debug = true

[logging]
allowed_levels = ["debug", "warn"]
output = "file"
log_dir = "/tmp/cadence-logs"
clear_old_log = true

[library]
extensions = ["mp3"]
recursive = false
include_hidden = true
follow_links = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENCE__PLAYER__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.volume, 40);
    assert_eq!(s.player.speed_rate, 1.5);
    assert!(s.player.mute);
    assert_eq!(s.player.audio_channel, AudioChannel::Stereo);
    assert_eq!(s.playlist.mode, PlaylistMode::OneRepeat);
    assert!(s.playlist.debug);
    assert_eq!(
        s.logging.allowed_levels,
        vec![LogLevel::Debug, LogLevel::Warning]
    );
    assert_eq!(s.logging.output, LogOutput::File);
    assert!(s.logging.clear_old_log);
    assert!(s.logging.allows(LogLevel::Debug));
    assert!(!s.logging.allows(LogLevel::Info));
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
volume = 75
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CADENCE__PLAYER__VOLUME", "20");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.volume, 20);
}

#[test]
fn settings_env_overrides_list_keys_with_commas() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
volume = 30

[logging]
allowed_levels = ["error"]
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENCE__PLAYER__VOLUME");
    let _g3 = EnvGuard::set("CADENCE__LOGGING__ALLOWED_LEVELS", "debug,INFO");
    let _g4 = EnvGuard::set("CADENCE__LIBRARY__EXTENSIONS", "flac");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.volume, 30);
    assert_eq!(
        s.logging.allowed_levels,
        vec![LogLevel::Debug, LogLevel::Info]
    );
    assert_eq!(s.library.extensions, vec!["flac".to_string()]);
}

#[test]
fn settings_env_rejects_unknown_level() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", "/nonexistent/cadence/config.toml");
    let _g2 = EnvGuard::set("CADENCE__LOGGING__ALLOWED_LEVELS", "debug,loud");

    let err = Settings::load().unwrap_err();
    assert!(matches!(err, SettingsError::Load(_)));
    assert!(err.to_string().contains("unknown log level: loud"));
}

#[test]
fn settings_load_reads_audio_output() {
    let s = Settings::from_toml_str("[player]\naudio_output = \"USB DAC\"\n").unwrap();
    assert_eq!(s.player.audio_output.as_deref(), Some("USB DAC"));
    assert_eq!(Settings::default().player.audio_output, None);
}

#[test]
fn unknown_logging_keys_are_rejected() {
    let err = Settings::from_toml_str(
        r#"
[logging]
allowed_levels = ["info"]
verbosity = 3
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("verbosity"));
}

#[test]
fn unknown_playlist_mode_is_rejected() {
    assert!(Settings::from_toml_str("[playlist]\nmode = \"shuffle-all\"\n").is_err());
}

#[test]
fn validate_rejects_out_of_range_player_values() {
    let mut s = Settings::default();
    s.player.volume = 150;
    assert!(matches!(s.validate(), Err(SettingsError::Volume(150))));

    let mut s = Settings::default();
    s.player.speed_rate = f32::NAN;
    assert!(matches!(s.validate(), Err(SettingsError::SpeedRate(_))));

    let mut s = Settings::default();
    s.player.speed_rate = 101.0;
    let err = s.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "player.speed_rate must be within 0.0..=100.0, got 101"
    );

    let mut s = Settings::default();
    s.library.extensions = vec![" ".into()];
    assert!(matches!(s.validate(), Err(SettingsError::NoExtensions)));
}
