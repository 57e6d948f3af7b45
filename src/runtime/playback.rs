use thiserror::Error;

use crate::player::{PlaybackEngine, Player, PlayerError};
use crate::playlist::{Playlist, PlaylistError};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error("no playable track left, last failure: {0}")]
    NothingPlayable(#[source] PlayerError),
}

/// Play the playlist from its cursor, advancing with `next(false)` after
/// each track. Stops after `limit` successful plays, or never when `None`.
///
/// Unplayable tracks are skipped with a forced advance; once every track has
/// failed in a row the run gives up. Returns the number of tracks played.
pub fn play_through<E: PlaybackEngine>(
    playlist: &mut Playlist,
    player: &mut Player<E>,
    limit: Option<usize>,
) -> Result<usize, RuntimeError> {
    let mut played = 0;
    let mut failures = 0;

    while limit.is_none_or(|limit| played < limit) {
        let path = playlist
            .current_track()
            .map(|t| t.path().to_path_buf())
            .ok_or(PlaylistError::Empty)?;

        match player.play(&path) {
            Ok(()) => {
                player.wait_for_playback();
                played += 1;
                failures = 0;
                playlist.next(false);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping track: {e}");
                failures += 1;
                if failures >= playlist.len() {
                    return Err(RuntimeError::NothingPlayable(e));
                }
                playlist.next(true);
            }
        }
    }

    Ok(played)
}
