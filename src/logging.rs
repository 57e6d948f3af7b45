//! Logging levels, sinks and subscriber setup.
//!
//! Components that log only when debugging is switched on (the playlist,
//! the player) do so through a [`LogSink`] handed to them by their owner.
//! The sink decides where records go; its `initialized` flag lives with it
//! rather than in any process-wide table.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{DebugConfig, LogOutput};

pub const PLAYLIST_SCOPE: &str = "core.playlist";
pub const PLAYER_SCOPE: &str = "core.player";

/// Config values go through [`FromStr`], so names are case-insensitive and
/// `warn` is accepted for `warning`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log level: {0}")]
pub struct UnknownLogLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            other => Err(UnknownLogLevel(other.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = UnknownLogLevel;

    fn try_from(value: String) -> Result<Self, <Self as TryFrom<String>>::Error> {
        value.parse()
    }
}

/// A record kept by a buffering sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub scope: String,
    pub message: String,
}

#[derive(Debug)]
enum SinkTarget {
    Terminal,
    File(PathBuf),
    Buffer(RefCell<Vec<LogRecord>>),
}

/// Destination for debug records of one component.
#[derive(Debug)]
pub struct LogSink {
    scope: String,
    target: SinkTarget,
    clear_old_log: bool,
    initialized: Cell<bool>,
}

impl LogSink {
    /// Forward records to the installed `tracing` subscriber.
    pub fn terminal(scope: impl Into<String>) -> Self {
        Self::with_target(scope.into(), SinkTarget::Terminal, false)
    }

    /// Append records to `<dir>/<scope>.log`, dots in the scope replaced by
    /// underscores. With `clear_old_log` the file is truncated on first use.
    pub fn file(scope: impl Into<String>, dir: impl AsRef<Path>, clear_old_log: bool) -> Self {
        let scope = scope.into();
        let path = dir.as_ref().join(log_file_name(&scope));
        Self::with_target(scope, SinkTarget::File(path), clear_old_log)
    }

    /// Keep records in memory.
    pub fn buffer(scope: impl Into<String>) -> Self {
        Self::with_target(scope.into(), SinkTarget::Buffer(RefCell::new(Vec::new())), false)
    }

    pub fn from_config(scope: impl Into<String>, config: &DebugConfig) -> Self {
        match config.output {
            LogOutput::Terminal => Self::terminal(scope),
            LogOutput::File => Self::file(scope, &config.log_dir, config.clear_old_log),
        }
    }

    fn with_target(scope: String, target: SinkTarget, clear_old_log: bool) -> Self {
        Self {
            scope,
            target,
            clear_old_log,
            initialized: Cell::new(false),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Whether the sink has prepared its destination (created the log
    /// directory, truncated the old file) yet.
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    pub fn file_path(&self) -> Option<&Path> {
        match &self.target {
            SinkTarget::File(path) => Some(path),
            _ => None,
        }
    }

    /// Snapshot of buffered records. Empty for non-buffering sinks.
    pub fn records(&self) -> Vec<LogRecord> {
        match &self.target {
            SinkTarget::Buffer(records) => records.borrow().clone(),
            _ => Vec::new(),
        }
    }

    /// Emit one record. Never fails: destination errors are reported through
    /// `tracing` and dropped.
    pub fn emit(&self, level: LogLevel, message: &str) {
        match &self.target {
            SinkTarget::Terminal => {
                self.initialized.set(true);
                dispatch(level, &self.scope, message);
            }
            SinkTarget::File(path) => {
                if let Err(e) = self.append_line(path, level, message) {
                    tracing::warn!(
                        scope = %self.scope,
                        path = %path.display(),
                        "failed to write log record: {e}"
                    );
                }
            }
            SinkTarget::Buffer(records) => {
                self.initialized.set(true);
                if let Ok(mut records) = records.try_borrow_mut() {
                    records.push(LogRecord {
                        level,
                        scope: self.scope.clone(),
                        message: message.to_string(),
                    });
                }
            }
        }
    }

    fn append_line(&self, path: &Path, level: LogLevel, message: &str) -> io::Result<()> {
        let first_use = !self.initialized.get();
        if first_use {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
        }

        let mut options = OpenOptions::new();
        options.create(true);
        if first_use && self.clear_old_log {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }
        let mut file = options.open(path)?;
        self.initialized.set(true);

        writeln!(
            file,
            "[{}] [{}] ({}): {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            level,
            self.scope,
            message
        )
    }
}

fn log_file_name(scope: &str) -> String {
    format!("{}.log", scope.replace('.', "_"))
}

fn dispatch(level: LogLevel, scope: &str, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!(scope = %scope, "{message}"),
        LogLevel::Info => tracing::info!(scope = %scope, "{message}"),
        LogLevel::Warning => tracing::warn!(scope = %scope, "{message}"),
        LogLevel::Error => tracing::error!(scope = %scope, "{message}"),
        LogLevel::Critical => tracing::error!(scope = %scope, critical = true, "{message}"),
    }
}

/// Install the global fmt subscriber. `RUST_LOG` wins over the `info` default.
/// Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn level_parses_names_and_aliases() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("critical".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert_eq!(
            "verbose".parse::<LogLevel>().unwrap_err(),
            UnknownLogLevel("verbose".into())
        );
    }

    #[test]
    fn level_deserializes_through_from_str() {
        #[derive(Debug, Deserialize)]
        struct Levels {
            levels: Vec<LogLevel>,
        }

        let parsed: Levels = toml::from_str(r#"levels = ["DEBUG", "Warn", "critical"]"#).unwrap();
        assert_eq!(
            parsed.levels,
            vec![LogLevel::Debug, LogLevel::Warning, LogLevel::Critical]
        );

        let err = toml::from_str::<Levels>(r#"levels = ["loud"]"#).unwrap_err();
        assert!(err.to_string().contains("unknown log level: loud"));
    }

    #[test]
    fn file_name_replaces_dots() {
        assert_eq!(log_file_name(PLAYLIST_SCOPE), "core_playlist.log");
    }

    #[test]
    fn buffer_sink_keeps_records_in_order() {
        let sink = LogSink::buffer(PLAYLIST_SCOPE);
        assert!(!sink.is_initialized());

        sink.emit(LogLevel::Info, "one");
        sink.emit(LogLevel::Error, "two");

        assert!(sink.is_initialized());
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "one");
        assert_eq!(records[1].level, LogLevel::Error);
        assert_eq!(records[1].scope, "core.playlist");
    }

    #[test]
    fn file_sink_creates_dir_and_clears_once() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("log");
        fs::create_dir_all(&log_dir).unwrap();
        fs::write(log_dir.join("core_playlist.log"), "stale line\n").unwrap();

        let sink = LogSink::file(PLAYLIST_SCOPE, &log_dir, true);
        sink.emit(LogLevel::Info, "first");
        sink.emit(LogLevel::Warning, "second");

        let content = fs::read_to_string(sink.file_path().unwrap()).unwrap();
        assert!(!content.contains("stale line"));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO] (core.playlist): first"));
        assert!(lines[1].ends_with("[WARNING] (core.playlist): second"));
    }

    #[test]
    fn file_sink_appends_without_clear() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("core_player.log"), "kept\n").unwrap();

        let sink = LogSink::file(PLAYER_SCOPE, dir.path(), false);
        sink.emit(LogLevel::Debug, "new");

        let content = fs::read_to_string(dir.path().join("core_player.log")).unwrap();
        assert!(content.starts_with("kept\n"));
        assert!(content.contains("[DEBUG] (core.player): new"));
    }

    #[test]
    fn file_sink_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();

        let sink = LogSink::file(PLAYLIST_SCOPE, &blocker, false);
        sink.emit(LogLevel::Error, "goes nowhere");
        assert!(!sink.is_initialized());
    }
}
