use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::config::{DebugConfig, PlayerSettings};
use crate::logging::{LogLevel, LogSink, PLAYER_SCOPE};

use super::engine::PlaybackEngine;
use super::error::PlayerError;

pub const MAX_VOLUME: u8 = 100;
pub const MAX_SPEED_RATE: f32 = 100.0;

/// Output channel layout requested from the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioChannel {
    #[default]
    Auto,
    Mono,
    Stereo,
}

impl fmt::Display for AudioChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Mono => "mono",
            Self::Stereo => "stereo",
        })
    }
}

impl FromStr for AudioChannel {
    type Err = PlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "mono" => Ok(Self::Mono),
            "stereo" => Ok(Self::Stereo),
            _ => Err(PlayerError::InvalidAudioChannel(s.to_string())),
        }
    }
}

/// Playback properties in front of a [`PlaybackEngine`].
pub struct Player<E: PlaybackEngine> {
    engine: E,
    volume: u8,
    speed_rate: f32,
    mute: bool,
    audio_channel: AudioChannel,
    paused: bool,
    debug: bool,
    debug_config: DebugConfig,
    sink: LogSink,
}

impl<E: PlaybackEngine> Player<E> {
    pub fn new(engine: E, settings: &PlayerSettings) -> Self {
        Self::with_sink(
            engine,
            settings,
            DebugConfig::default(),
            LogSink::terminal(PLAYER_SCOPE),
        )
    }

    /// A player whose debug records go to a sink built from `debug_config`.
    pub fn with_debug(engine: E, settings: &PlayerSettings, debug_config: DebugConfig) -> Self {
        let sink = LogSink::from_config(PLAYER_SCOPE, &debug_config);
        Self::with_sink(engine, settings, debug_config, sink)
    }

    /// Build a player and push the initial settings down to the engine.
    pub fn with_sink(
        engine: E,
        settings: &PlayerSettings,
        debug_config: DebugConfig,
        sink: LogSink,
    ) -> Self {
        let mut player = Self {
            engine,
            volume: 0,
            speed_rate: 1.0,
            mute: false,
            audio_channel: settings.audio_channel,
            paused: false,
            debug: settings.debug,
            debug_config,
            sink,
        };
        player.set_volume(i32::from(settings.volume));
        player.set_speed_rate(settings.speed_rate);
        player.set_mute(settings.mute);
        player
    }

    fn log(&self, level: LogLevel, message: impl FnOnce() -> String) {
        if self.debug && self.debug_config.allows(level) {
            self.sink.emit(level, &message());
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Clamp to `0..=100` and forward. Returns the applied value.
    pub fn set_volume(&mut self, volume: i32) -> u8 {
        let volume = volume.clamp(0, i32::from(MAX_VOLUME)) as u8;
        self.volume = volume;
        self.engine.set_volume(volume);
        self.log(LogLevel::Debug, || format!("Volume set to {volume}"));
        volume
    }

    pub fn speed_rate(&self) -> f32 {
        self.speed_rate
    }

    /// Clamp to `0.0..=100.0` and forward. Non-finite rates are ignored.
    /// Returns the rate in effect afterwards.
    pub fn set_speed_rate(&mut self, rate: f32) -> f32 {
        if !rate.is_finite() {
            self.log(LogLevel::Warning, || format!("Ignoring speed rate {rate}"));
            return self.speed_rate;
        }
        let rate = rate.clamp(0.0, MAX_SPEED_RATE);
        self.speed_rate = rate;
        self.engine.set_speed(rate);
        self.log(LogLevel::Debug, || format!("Speed rate set to {rate}"));
        rate
    }

    pub fn is_muted(&self) -> bool {
        self.mute
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
        self.engine.set_muted(mute);
    }

    pub fn audio_channel(&self) -> AudioChannel {
        self.audio_channel
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Start playing `path` from the beginning.
    pub fn play(&mut self, path: impl AsRef<Path>) -> Result<(), PlayerError> {
        let path = path.as_ref();
        self.log(LogLevel::Info, || format!("Playing {}", path.display()));
        if let Err(e) = self.engine.play(path) {
            self.log(LogLevel::Error, || e.to_string());
            return Err(e);
        }
        self.paused = false;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.engine.set_paused(true);
        self.log(LogLevel::Debug, || "Paused".to_string());
    }

    pub fn unpause(&mut self) {
        self.paused = false;
        self.engine.set_paused(false);
        self.log(LogLevel::Debug, || "Resumed".to_string());
    }

    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }

    pub fn wait_for_playback(&self) {
        self.engine.wait_for_playback();
    }
}
