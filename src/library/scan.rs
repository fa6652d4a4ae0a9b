use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::classify::has_audio_extension;
use super::model::{AudioPath, Playlist};

/// Build the playlist of `target`'s directory.
///
/// Only the immediate children of the parent directory are considered, in
/// the order the filesystem yields them. `start_index` points at `target`,
/// or is 0 when the target is no longer there. Any read error yields an
/// empty playlist.
pub fn build_playlist(target: &AudioPath, settings: &LibrarySettings) -> Playlist {
    let Some(dir) = target.as_path().parent() else {
        return Playlist::default();
    };

    let tracks = match scan_dir(dir, settings) {
        Ok(tracks) => tracks,
        Err(e) => {
            tracing::warn!("failed to read directory {}: {e}", dir.display());
            return Playlist::default();
        }
    };

    let start_index = tracks
        .iter()
        .position(|t| t == target)
        .unwrap_or_else(|| {
            tracing::debug!(
                "{} vanished from its own directory scan",
                target.as_path().display()
            );
            0
        });

    let playlist = Playlist {
        tracks,
        start_index,
    };
    tracing::info!(
        "playlist of {} tracks from {}, starting at {start_index}",
        playlist.len(),
        dir.display()
    );
    playlist
}

fn scan_dir(dir: &Path, settings: &LibrarySettings) -> Result<Vec<AudioPath>, walkdir::Error> {
    let exts = settings.normalized_extensions();
    let mut tracks = Vec::new();

    // Depth 0 is `dir` itself; depth 1 are its entries. Links are resolved
    // per entry so a dangling one only drops itself.
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if !has_audio_extension(path, &exts) {
            continue;
        }

        let is_file = if entry.path_is_symlink() {
            fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
        } else {
            entry.file_type().is_file()
        };
        if is_file {
            tracks.push(AudioPath::new(path.to_path_buf()));
        }
    }

    Ok(tracks)
}
