use std::path::{Path, PathBuf};

/// Absolute path of a file that passed classification as supported audio.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioPath(PathBuf);

impl AudioPath {
    /// Only the classifier and the directory scan construct these.
    pub(super) fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for AudioPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Sibling audio files of one directory, in enumeration order, plus the
/// position playback should start from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    pub tracks: Vec<AudioPath>,
    pub start_index: usize,
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The track at `start_index`, if the playlist is not empty.
    pub fn start_track(&self) -> Option<&AudioPath> {
        self.tracks.get(self.start_index)
    }
}
