use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`Playlist`](super::Playlist) operations.
///
/// A failing operation leaves the playlist exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("track '{}' is already in the playlist", .0.display())]
    TrackExists(PathBuf),

    #[error("track '{}' is not in the playlist", .0.display())]
    TrackNotExists(PathBuf),

    #[error("index {index} is out of range for a playlist of {len} tracks")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("invalid playlist mode: {0} (expected \"loop\" or \"one_repeat\")")]
    InvalidMode(String),

    #[error("the playlist is empty")]
    Empty,
}
