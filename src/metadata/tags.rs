use std::path::Path;

use lofty::error::LoftyError;
use lofty::prelude::*;

/// Embedded cover art.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

/// Tags as read from the file. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBundle {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub picture: Option<Picture>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagResult {
    Populated(TagBundle),
    /// No tags, or extraction failed.
    Empty,
}

impl TagResult {
    pub fn bundle(&self) -> Option<&TagBundle> {
        match self {
            Self::Populated(bundle) => Some(bundle),
            Self::Empty => None,
        }
    }
}

/// Blocking extraction with `lofty`. `Ok(None)` means the file carries no tag.
pub(super) fn extract(path: &Path) -> Result<Option<TagBundle>, LoftyError> {
    let tagged = lofty::read_from_path(path)?;

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return Ok(None);
    };

    let picture = tag.pictures().first().map(|p| Picture {
        mime_type: p.mime_type().map(|m| m.as_str().to_string()),
        data: p.data().to_vec(),
    });

    Ok(Some(TagBundle {
        title: tag.title().map(|v| v.into_owned()),
        artist: tag.artist().map(|v| v.into_owned()),
        album: tag.album().map(|v| v.into_owned()),
        picture,
    }))
}
