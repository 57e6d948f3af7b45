//! Playlist: an ordered, duplicate-free track collection with a cursor.
//!
//! The collection side (add/remove/pop/clear/lookups) lives in `model`,
//! cursor movement and modes in `navigation`.

mod error;
mod model;
mod navigation;

pub use error::PlaylistError;
pub use model::Playlist;
pub use navigation::{PlaylistMode, step_index};
