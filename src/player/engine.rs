use std::path::Path;

use super::error::PlayerError;

/// The native side of playback.
///
/// Values arrive already clamped by [`Player`](super::Player): volume in
/// `0..=100`, speed in `0.0..=100.0`.
pub trait PlaybackEngine {
    /// Replace whatever is playing with the file at `path` and start it.
    fn play(&mut self, path: &Path) -> Result<(), PlayerError>;

    fn set_paused(&mut self, paused: bool);

    fn set_volume(&mut self, volume: u8);

    fn set_speed(&mut self, rate: f32);

    fn set_muted(&mut self, muted: bool);

    /// True when nothing is queued any more.
    fn is_finished(&self) -> bool;

    /// Block until the current file has played out.
    fn wait_for_playback(&self) {}
}
