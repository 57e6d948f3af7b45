//! cadence: a duplicate-free playlist with a navigation cursor, and a thin
//! player wrapper to drive it.
//!
//! - [`track`]: immutable track values with a generated id
//! - [`playlist`]: the ordered collection, cursor and navigation modes
//! - [`player`]: clamped playback properties over a [`player::PlaybackEngine`]
//! - [`config`]: settings loaded from TOML and the environment
//! - [`logging`]: debug sinks and `tracing` setup
//! - [`library`]: directory scanning

pub mod config;
pub mod library;
pub mod logging;
pub mod player;
pub mod playlist;
pub mod runtime;
pub mod track;

pub use player::{PlaybackEngine, Player, PlayerError};
pub use playlist::{Playlist, PlaylistError, PlaylistMode};
pub use track::{Track, TrackError, TrackSource};
