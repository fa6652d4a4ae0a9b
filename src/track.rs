//! Loading one track for the UI: a URL its media element can play, plus
//! sidecar lyrics.

mod lyrics;
mod resolve;

pub use resolve::{TrackPayload, resolve_track};
