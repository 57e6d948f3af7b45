//! Playback: a property wrapper (`Player`) around a native engine.
//!
//! The engine is reached only through [`PlaybackEngine`]; `Player` owns the
//! clamping of volume and speed before anything is handed to it.

mod engine;
mod error;
mod model;
mod rodio_engine;

pub use engine::PlaybackEngine;
pub use error::PlayerError;
pub use model::{AudioChannel, MAX_SPEED_RATE, MAX_VOLUME, Player};
pub use rodio_engine::RodioEngine;
