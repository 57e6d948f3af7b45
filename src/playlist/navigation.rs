//! Cursor movement: wrapped stepping, mode handling and explicit selection.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::logging::LogLevel;
use crate::track::Track;

use super::error::PlaylistError;
use super::model::Playlist;

/// How `next`/`previous` treat the cursor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistMode {
    /// Every step moves the cursor, wrapping at both ends.
    #[default]
    #[serde(alias = "loop-all", alias = "loop_all", alias = "loopall")]
    Loop,
    /// Steps hold the cursor on the current track unless forced.
    #[serde(
        alias = "one-repeat",
        alias = "repeat-one",
        alias = "repeat_one",
        alias = "loop-one",
        alias = "loop_one"
    )]
    OneRepeat,
}

impl PlaylistMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::OneRepeat => "one_repeat",
        }
    }
}

impl fmt::Display for PlaylistMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaylistMode {
    type Err = PlaylistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loop" | "loop-all" | "loop_all" | "loopall" => Ok(Self::Loop),
            "one_repeat" | "one-repeat" | "repeat-one" | "repeat_one" | "loop-one"
            | "loop_one" => Ok(Self::OneRepeat),
            _ => Err(PlaylistError::InvalidMode(s.to_string())),
        }
    }
}

/// `(index + step) mod len`, wrapping in both directions.
///
/// Returns `None` for an empty list.
pub fn step_index(index: usize, len: usize, step: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let wrapped = (index as isize % len + step % len).rem_euclid(len);
    Some(wrapped as usize)
}

impl Playlist {
    pub fn mode(&self) -> PlaylistMode {
        self.mode
    }

    /// Takes effect on the very next `next`/`previous` call.
    pub fn set_mode(&mut self, mode: PlaylistMode) {
        self.log(LogLevel::Info, || format!("Switching playlist mode to {mode}"));
        self.mode = mode;
    }

    pub fn set_mode_str(&mut self, mode: &str) -> Result<(), PlaylistError> {
        let mode = mode.parse()?;
        self.set_mode(mode);
        Ok(())
    }

    /// The track after the cursor and its index, without moving.
    pub fn peek_next(&self) -> Option<(&Track, usize)> {
        self.peek(1)
    }

    /// The track before the cursor and its index, without moving.
    pub fn peek_previous(&self) -> Option<(&Track, usize)> {
        self.peek(-1)
    }

    fn peek(&self, step: isize) -> Option<(&Track, usize)> {
        let current = self.current_index?;
        let target = step_index(current, self.tracks.len(), step)?;
        self.tracks.get(target).map(|track| (track, target))
    }

    /// Step forward. In `OneRepeat` the cursor only moves when `force` is set.
    ///
    /// Returns the (possibly unchanged) current track, `None` when empty.
    pub fn next(&mut self, force: bool) -> Option<&Track> {
        self.log(LogLevel::Info, || "Moving to the next track".to_string());
        self.step(1, force)
    }

    /// Step backward. In `OneRepeat` the cursor only moves when `force` is set.
    pub fn previous(&mut self, force: bool) -> Option<&Track> {
        self.log(LogLevel::Info, || "Moving to the previous track".to_string());
        self.step(-1, force)
    }

    fn step(&mut self, step: isize, force: bool) -> Option<&Track> {
        let (_, target) = self.peek(step)?;
        if force || self.mode == PlaylistMode::Loop {
            self.current_index = Some(target);
        }
        self.log(LogLevel::Info, || match self.current_track() {
            Some(track) => format!("Current track: {track}"),
            None => "Current track: none".to_string(),
        });
        self.current_track()
    }

    /// Put the cursor on `index`, regardless of mode.
    pub fn select(&mut self, index: usize) -> Result<&Track, PlaylistError> {
        if index >= self.tracks.len() {
            return Err(PlaylistError::IndexOutOfRange {
                index: index as isize,
                len: self.tracks.len(),
            });
        }
        self.log(LogLevel::Debug, || format!("Selecting index {index}"));
        self.current_index = Some(index);
        Ok(&self.tracks[index])
    }
}
