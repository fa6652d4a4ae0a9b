use std::fs;
use std::path::Path;

use crate::config::LibrarySettings;

use super::model::AudioPath;

pub(super) fn has_audio_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Decide whether `path` is a supported audio file.
///
/// The path must exist and resolve (through symlinks) to a regular file with
/// one of the configured extensions. The file is never opened. Any
/// filesystem error counts as "not audio".
pub fn classify(path: impl AsRef<Path>, settings: &LibrarySettings) -> Option<AudioPath> {
    let path = path.as_ref();
    if !has_audio_extension(path, &settings.normalized_extensions()) {
        return None;
    }

    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return None,
        Err(e) => {
            tracing::debug!("not classifying {}: {e}", path.display());
            return None;
        }
    }

    std::path::absolute(path).ok().map(AudioPath::new)
}
