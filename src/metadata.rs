//! Embedded tag extraction for the UI.
//!
//! The UI never sees an extraction error: anything that goes wrong while
//! reading tags turns into [`TagResult::Empty`].

mod gateway;
mod tags;

pub use gateway::read_tags;
pub use tags::TagResult;
#[cfg(test)]
pub(crate) use tags::{Picture, TagBundle};
