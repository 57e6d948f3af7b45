//! Binary entry point: play a directory as a playlist.

use std::env;
use std::path::PathBuf;

use crate::library::scan;
use crate::logging::init_tracing;
use crate::player::{Player, PlayerError, RodioEngine};
use crate::playlist::Playlist;

mod playback;
mod settings;

pub use playback::{RuntimeError, play_through};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let settings = settings::load_settings();

    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("Music"));

    let mut playlist = Playlist::with_debug(
        settings.playlist.mode,
        settings.playlist.debug,
        settings.logging.clone(),
    );
    let added = playlist.extend(scan(&dir, &settings.library));
    tracing::info!(dir = %dir.display(), tracks = added, mode = %playlist.mode(), "playlist ready");

    let engine = open_engine(settings.player.audio_output.as_deref())?;
    let mut player = Player::with_debug(engine, &settings.player, settings.logging.clone());

    play_through(&mut playlist, &mut player, None)?;
    Ok(())
}

/// Open the configured output device, falling back to the system default.
fn open_engine(output: Option<&str>) -> Result<RodioEngine, PlayerError> {
    match RodioEngine::open(output) {
        Ok(engine) => Ok(engine),
        Err(e) if output.is_some() => {
            tracing::warn!("{e}; using the default output device");
            RodioEngine::open(None)
        }
        Err(e) => Err(e),
    }
}
