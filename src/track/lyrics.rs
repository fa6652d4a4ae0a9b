use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Read the sidecar lyrics of `track`.
///
/// `exts` is tried in order and the first sidecar that exists wins, even if
/// reading it then fails.
pub(super) fn read_sidecar_lyrics(track: &Path, exts: &[String]) -> Option<String> {
    let sidecar = exts.iter().find_map(|ext| find_sidecar(track, ext))?;

    match fs::read_to_string(&sidecar) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("failed to read lyrics {}: {e}", sidecar.display());
            None
        }
    }
}

/// `<stem>.<ext>` next to `track`: the exact name first, then any casing of
/// the extension.
fn find_sidecar(track: &Path, ext: &str) -> Option<PathBuf> {
    let exact = track.with_extension(ext);
    if exact.is_file() {
        return Some(exact);
    }

    let stem = track.file_stem()?;
    let dir = track.parent()?;
    fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|p| {
            p.file_stem() == Some(stem)
                && p.extension()
                    .and_then(OsStr::to_str)
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
                && p.is_file()
        })
}
