//! Track values stored in a [`Playlist`](crate::playlist::Playlist).
//!
//! A `Track` is immutable once built. Two notions of sameness exist:
//! structural equality (`path` + `source`) decides membership, identity
//! (`id`) decides lookups.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("invalid track duration: {0} (expected a finite, non-negative number of seconds)")]
    InvalidDuration(f64),
    #[error("unknown track source: {0}")]
    UnknownSource(String),
}

/// Where a track is read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackSource {
    /// A file on the local filesystem.
    #[default]
    Local,
}

impl TrackSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
        }
    }
}

impl fmt::Display for TrackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackSource {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            other => Err(TrackError::UnknownSource(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    path: PathBuf,
    source: TrackSource,
    title: Option<String>,
    duration: Option<Duration>,
    id: String,
}

impl Track {
    /// Create a local track with a freshly generated id.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_source(path, TrackSource::Local)
    }

    pub fn with_source(path: impl Into<PathBuf>, source: TrackSource) -> Self {
        Self {
            path: path.into(),
            source,
            title: None,
            duration: None,
            id: Uuid::new_v4().simple().to_string(),
        }
    }

    /// Create a local track and fill title/duration from the file tags.
    ///
    /// Files that cannot be read or carry no tags still produce a track,
    /// just without metadata.
    pub fn probe(path: impl Into<PathBuf>) -> Self {
        let mut track = Self::new(path);

        if let Ok(tagged) = lofty::read_from_path(&track.path) {
            let duration = tagged.properties().duration();
            if !duration.is_zero() {
                track.duration = Some(duration);
            }

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    let v = v.trim();
                    if !v.is_empty() {
                        track.title = Some(v.to_string());
                    }
                }
            }
        }

        track
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a duration in seconds.
    pub fn with_duration(mut self, secs: f64) -> Result<Self, TrackError> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(TrackError::InvalidDuration(secs));
        }
        self.duration = Some(Duration::from_secs_f64(secs));
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> TrackSource {
        self.source
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Same `path` and `source`; metadata and id are ignored.
    pub fn structurally_equal(&self, other: &Track) -> bool {
        self.path == other.path && self.source == other.source
    }

    /// Same generated id.
    pub fn same_identity(&self, other: &Track) -> bool {
        self.id == other.id
    }

    /// Title if known, otherwise the file stem.
    pub fn display_name(&self) -> String {
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.path.display(), self.source)
    }
}
