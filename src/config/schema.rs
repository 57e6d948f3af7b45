use std::path::PathBuf;

use serde::Deserialize;

use crate::logging::LogLevel;
use crate::player::AudioChannel;
use crate::playlist::PlaylistMode;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadence/config.toml` or `~/.config/cadence/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENCE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub playlist: PlaylistSettings,
    pub logging: DebugConfig,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Initial volume, 0..=100.
    pub volume: u8,
    /// Initial playback speed, 0.0..=100.0 (1.0 is normal speed).
    pub speed_rate: f32,
    pub mute: bool,
    pub audio_channel: AudioChannel,
    /// Output device name; unset or `"auto"` uses the system default.
    pub audio_output: Option<String>,
    /// Whether the player emits debug records.
    pub debug: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: 75,
            speed_rate: 1.0,
            mute: false,
            audio_channel: AudioChannel::Auto,
            audio_output: None,
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Navigation mode the playlist starts in.
    pub mode: PlaylistMode,
    /// Whether the playlist emits debug records.
    pub debug: bool,
}

/// Where debug records are written.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Terminal,
    File,
}

/// Verbosity and destination of debug logging (`[logging]`).
///
/// Unknown keys are rejected instead of being ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugConfig {
    /// Levels that are let through; everything else is dropped.
    pub allowed_levels: Vec<LogLevel>,
    pub output: LogOutput,
    /// Directory for `output = "file"`.
    pub log_dir: PathBuf,
    /// Truncate the log file the first time a sink writes to it.
    pub clear_old_log: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            allowed_levels: LogLevel::ALL.to_vec(),
            output: LogOutput::Terminal,
            log_dir: PathBuf::from("./log"),
            clear_old_log: false,
        }
    }
}

impl DebugConfig {
    pub fn allows(&self, level: LogLevel) -> bool {
        self.allowed_levels.contains(&level)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}
