use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output device: {0}")]
    OutputDevice(String),

    #[error("audio output device not found: {0}")]
    DeviceNotFound(String),

    #[error("invalid audio channel: {0} (expected \"auto\", \"mono\" or \"stereo\")")]
    InvalidAudioChannel(String),
}
