use std::path::Path;

use url::Url;

use crate::config::LibrarySettings;

use super::lyrics::read_sidecar_lyrics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPayload {
    /// `file://` URL of the audio file.
    pub src: Url,
    /// Contents of the preferred sidecar lyric file, if any.
    pub lyrics: Option<String>,
    /// File name without its extension.
    pub name: String,
}

/// Resolve `path` into something the UI can play and display.
///
/// Returns `None` only when no `file://` URL can be built for the path,
/// which means it is not absolute. Missing or unreadable lyrics are not an
/// error.
pub fn resolve_track(path: &Path, settings: &LibrarySettings) -> Option<TrackPayload> {
    let src = match Url::from_file_path(path) {
        Ok(url) => url,
        Err(()) => {
            tracing::warn!("cannot build a file URL for {}", path.display());
            return None;
        }
    };

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let lyrics = read_sidecar_lyrics(path, &settings.normalized_lyric_extensions());

    Some(TrackPayload { src, lyrics, name })
}
