//! Audio file classification and directory playlists.
//!
//! A launch only ever names one file; the playlist is derived from that
//! file's siblings.

mod classify;
mod model;
mod scan;

pub use classify::classify;
pub use model::{AudioPath, Playlist};
pub use scan::build_playlist;
