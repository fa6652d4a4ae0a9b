use std::sync::mpsc::Sender;

use crate::instance::{Arbitration, InstanceError, InstanceLock};
use crate::launch::{LaunchOrigin, LaunchTarget};
use crate::session::{Phase, SessionEvent};

/// Take the instance lock, or hand `argv` to the instance that holds it.
///
/// Returns the lock guard when this process should host the session and
/// `None` when it should exit. This process's own launch is queued on
/// `events` first, so it is handled before any launch the lock delivers.
pub fn acquire<L: InstanceLock>(
    lock: &L,
    argv: &[String],
    events: Sender<SessionEvent>,
) -> Result<Option<L::Guard>, InstanceError> {
    let own = LaunchTarget::from_args(LaunchOrigin::Startup, argv);
    let _ = events.send(SessionEvent::Launch(own));

    match lock.acquire(argv, events)? {
        Arbitration::Primary(guard) => {
            tracing::debug!(from = ?Phase::Unlaunched, to = ?Phase::LockAcquired, "startup");
            Ok(Some(guard))
        }
        Arbitration::Secondary => {
            tracing::debug!(from = ?Phase::Unlaunched, to = ?Phase::Terminated, "startup");
            Ok(None)
        }
    }
}
