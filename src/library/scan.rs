use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::track::Track;

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn is_audio_file(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Collect audio files under `dir` as tracks, sorted by display name
/// (case-insensitive) and then by path.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let exts = normalized_extensions(settings);
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() || e.path().is_file())
        .filter(|e| is_audio_file(e.path(), &exts))
        .map(|e| Track::probe(e.path()))
        .collect();

    tracks.sort_by_cached_key(|t| (t.display_name().to_lowercase(), t.path().to_path_buf()));
    tracks
}
