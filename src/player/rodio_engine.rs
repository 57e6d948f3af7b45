//! `PlaybackEngine` backed by `rodio`.
//!
//! One `Sink` per played file, connected to the output stream's mixer.
//! Volume, speed and mute are re-applied to every new sink.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::cpal::traits::{DeviceTrait, HostTrait};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use super::engine::PlaybackEngine;
use super::error::PlayerError;

pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: u8,
    speed: f32,
    muted: bool,
    paused: bool,
}

impl RodioEngine {
    /// Open the output device called `output`, or the system default when
    /// `output` is unset, blank or `"auto"`.
    pub fn open(output: Option<&str>) -> Result<Self, PlayerError> {
        let mut stream = match requested_device(output) {
            Some(name) => open_named_stream(name)?,
            None => OutputStreamBuilder::open_default_stream()
                .map_err(|e| PlayerError::OutputDevice(e.to_string()))?,
        };
        // rodio logs to stderr when OutputStream is dropped.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            volume: 100,
            speed: 1.0,
            muted: false,
            paused: false,
        })
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.volume) / 100.0
        }
    }
}

fn requested_device(output: Option<&str>) -> Option<&str> {
    output
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case("auto"))
}

fn open_named_stream(name: &str) -> Result<OutputStream, PlayerError> {
    let host = rodio::cpal::default_host();
    let device = host
        .output_devices()
        .map_err(|e| PlayerError::OutputDevice(e.to_string()))?
        .find(|candidate| candidate.name().ok().as_deref() == Some(name))
        .ok_or_else(|| PlayerError::DeviceNotFound(name.to_string()))?;
    OutputStreamBuilder::from_device(device)
        .and_then(|builder| builder.open_stream_or_fallback())
        .map_err(|e| PlayerError::OutputDevice(e.to_string()))
}

impl PlaybackEngine for RodioEngine {
    fn play(&mut self, path: &Path) -> Result<(), PlayerError> {
        let file = File::open(path).map_err(|source| PlayerError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| PlayerError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.effective_volume());
        sink.set_speed(self.speed);
        sink.append(source);
        sink.play();
        self.paused = false;
        self.sink = Some(sink);
        Ok(())
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if let Some(sink) = &self.sink {
            if paused {
                sink.pause();
            } else {
                sink.play();
            }
        }
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.effective_volume());
        }
    }

    fn set_speed(&mut self, rate: f32) {
        self.speed = rate;
        if let Some(sink) = &self.sink {
            sink.set_speed(rate);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.effective_volume());
        }
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().is_none_or(Sink::empty)
    }

    fn wait_for_playback(&self) {
        if self.paused {
            return;
        }
        if let Some(sink) = &self.sink {
            sink.sleep_until_end();
        }
    }
}
