use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use super::tags::{TagResult, extract};

/// Read the tags of `path` without blocking the caller's executor.
///
/// The extraction runs on the shared blocking pool, so concurrent requests
/// don't wait on each other and a flood of requests can't spawn threads
/// without bound. Never fails: errors are logged and reported as
/// [`TagResult::Empty`].
pub async fn read_tags(path: PathBuf) -> TagResult {
    let shown = path.display().to_string();

    let outcome = blocking::unblock(move || {
        panic::catch_unwind(AssertUnwindSafe(|| {
            extract(&path).map_err(|e| e.to_string())
        }))
    })
    .await;

    match outcome {
        Ok(Ok(Some(bundle))) => TagResult::Populated(bundle),
        Ok(Ok(None)) => {
            tracing::debug!("no tags in {shown}");
            TagResult::Empty
        }
        Ok(Err(e)) => {
            tracing::warn!("failed to read tags from {shown}: {e}");
            TagResult::Empty
        }
        Err(_) => {
            tracing::warn!("tag reader panicked on {shown}");
            TagResult::Empty
        }
    }
}
