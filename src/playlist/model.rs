//! The `Playlist` collection: membership, insertion, removal and queries.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::DebugConfig;
use crate::logging::{LogLevel, LogSink, PLAYLIST_SCOPE};
use crate::track::Track;

use super::error::PlaylistError;
use super::navigation::PlaylistMode;

/// An ordered, duplicate-free collection of tracks with a cursor.
///
/// Invariants kept by every operation:
/// - `tracks` and `track_ids` have the same length;
/// - `current_index` is `None` iff there are no tracks, otherwise in bounds;
/// - no two tracks are structurally equal.
///
/// `track_ids` stays in insertion order while `tracks` may be reordered by
/// [`shuffle`](Playlist::shuffle).
#[derive(Debug)]
pub struct Playlist {
    pub(super) tracks: Vec<Track>,
    pub(super) track_ids: Vec<String>,
    pub(super) current_index: Option<usize>,
    pub(super) mode: PlaylistMode,
    debug: bool,
    debug_config: DebugConfig,
    sink: LogSink,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(PlaylistMode::default())
    }
}

impl Playlist {
    /// An empty playlist with debugging off.
    pub fn new(mode: PlaylistMode) -> Self {
        Self::with_sink(mode, false, DebugConfig::default(), LogSink::terminal(PLAYLIST_SCOPE))
    }

    /// An empty playlist whose debug records go to a sink built from `debug_config`.
    pub fn with_debug(mode: PlaylistMode, debug: bool, debug_config: DebugConfig) -> Self {
        let sink = LogSink::from_config(PLAYLIST_SCOPE, &debug_config);
        Self::with_sink(mode, debug, debug_config, sink)
    }

    /// An empty playlist writing debug records to the given sink.
    pub fn with_sink(
        mode: PlaylistMode,
        debug: bool,
        debug_config: DebugConfig,
        sink: LogSink,
    ) -> Self {
        let playlist = Self {
            tracks: Vec::new(),
            track_ids: Vec::new(),
            current_index: None,
            mode,
            debug,
            debug_config,
            sink,
        };
        playlist.log(LogLevel::Debug, || format!("Creating playlist in {mode} mode"));
        playlist
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn debug_config(&self) -> &DebugConfig {
        &self.debug_config
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Emit a debug record if debugging is on and `level` is allowed.
    /// The message is only built when it will be emitted.
    pub(super) fn log(&self, level: LogLevel, message: impl FnOnce() -> String) {
        if self.debug && self.debug_config.allows(level) {
            self.sink.emit(level, &message());
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.log(LogLevel::Debug, || format!("Reading index {index}"));
        self.tracks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.log(LogLevel::Debug, || "Iterating over the playlist".to_string());
        self.tracks.iter()
    }

    /// Tracks in play order.
    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }

    /// Same length and pairwise structurally equal tracks, in play order.
    pub fn same_tracks(&self, other: &[Track]) -> bool {
        self.tracks.len() == other.len()
            && self
                .tracks
                .iter()
                .zip(other)
                .all(|(a, b)| a.structurally_equal(b))
    }

    /// Structural membership test (`path` + `source`).
    pub fn contains(&self, track: &Track) -> bool {
        self.position(track).is_some()
    }

    fn position(&self, track: &Track) -> Option<usize> {
        self.tracks.iter().position(|t| t.structurally_equal(track))
    }

    /// Membership test that can fail on a chosen outcome.
    ///
    /// With `raise_on = Some(true)` a present track yields `TrackExists`;
    /// with `Some(false)` a missing one yields `TrackNotExists`.
    pub fn has_track(&self, track: &Track, raise_on: Option<bool>) -> Result<bool, PlaylistError> {
        self.log(LogLevel::Debug, || {
            format!("Checking for track ({track}) (raise on: {raise_on:?})")
        });
        let present = self.contains(track);
        match raise_on {
            Some(true) if present => Err(PlaylistError::TrackExists(track.path().to_path_buf())),
            Some(false) if !present => {
                Err(PlaylistError::TrackNotExists(track.path().to_path_buf()))
            }
            _ => Ok(present),
        }
    }

    /// Append a track. The first track puts the cursor on index 0.
    pub fn add(&mut self, track: Track) -> Result<(), PlaylistError> {
        self.log(LogLevel::Info, || format!("Adding track ({track})"));
        self.has_track(&track, Some(true))?;
        self.track_ids.push(track.id().to_string());
        self.tracks.push(track);
        if self.current_index.is_none() {
            self.current_index = Some(0);
        }
        Ok(())
    }

    /// Add every track that is not already present; returns how many were added.
    pub fn extend<I>(&mut self, tracks: I) -> usize
    where
        I: IntoIterator<Item = Track>,
    {
        let mut added = 0;
        for track in tracks {
            match self.add(track) {
                Ok(()) => added += 1,
                Err(e) => self.log(LogLevel::Warning, || format!("Skipping: {e}")),
            }
        }
        added
    }

    /// Remove the first track structurally equal to `track` and return it.
    pub fn remove(&mut self, track: &Track) -> Result<Track, PlaylistError> {
        self.log(LogLevel::Info, || format!("Removing track ({track})"));
        self.has_track(track, Some(false))?;
        let index = self
            .position(track)
            .ok_or_else(|| PlaylistError::TrackNotExists(track.path().to_path_buf()))?;
        Ok(self.remove_at(index))
    }

    /// Remove and return the track at `index`. Negative indices count from
    /// the end (`-1` is the last track).
    pub fn pop(&mut self, index: isize) -> Result<Track, PlaylistError> {
        self.log(LogLevel::Info, || format!("Popping index {index}"));
        let len = self.tracks.len();
        let resolved = if index < 0 {
            index + len as isize
        } else {
            index
        };
        if resolved < 0 || resolved as usize >= len {
            return Err(PlaylistError::IndexOutOfRange { index, len });
        }
        Ok(self.remove_at(resolved as usize))
    }

    pub fn pop_last(&mut self) -> Result<Track, PlaylistError> {
        self.pop(-1)
    }

    /// Removes from both lists and repairs the cursor: a removal before the
    /// cursor keeps the same current track; removing the current track leaves
    /// the cursor on its successor, wrapping to 0 past the end.
    fn remove_at(&mut self, index: usize) -> Track {
        let removed = self.tracks.remove(index);
        if let Some(pos) = self.track_ids.iter().position(|id| id == removed.id()) {
            self.track_ids.remove(pos);
        }

        self.current_index = match self.current_index {
            _ if self.tracks.is_empty() => None,
            Some(current) if index < current => Some(current - 1),
            Some(current) if current >= self.tracks.len() => Some(0),
            other => other,
        };
        removed
    }

    /// Drop every track and reset the cursor.
    pub fn clear(&mut self) {
        self.log(LogLevel::Info, || "Clearing the playlist".to_string());
        self.tracks.clear();
        self.track_ids.clear();
        self.current_index = None;
    }

    /// Lookup by generated id.
    pub fn get_by_id(&self, id: &str) -> Option<&Track> {
        self.log(LogLevel::Debug, || format!("Looking up id {id}"));
        self.tracks.iter().find(|t| t.id() == id)
    }

    /// Snapshot of the tracks, in play order or in insertion order.
    pub fn get_all(&self, original_order: bool) -> Vec<Track> {
        if !original_order {
            return self.tracks.clone();
        }
        self.track_ids
            .iter()
            .filter_map(|id| self.tracks.iter().find(|t| t.id() == id))
            .cloned()
            .collect()
    }

    /// Reorder the tracks randomly, keeping the cursor on the same track.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.log(LogLevel::Info, || "Shuffling the playlist".to_string());
        let current_id = self.current_track().map(|t| t.id().to_string());
        self.tracks.shuffle(rng);
        if let Some(id) = current_id {
            self.current_index = self.tracks.iter().position(|t| t.id() == id);
        }
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
