//! Single-instance arbitration.
//!
//! The first process to take the lock hosts the session. Every later
//! process hands its command line to that host and exits.

use std::sync::mpsc::Sender;

use thiserror::Error;

use crate::session::SessionEvent;

mod bus;

pub use bus::{BusHost, BusLock};

#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("session bus error: {0}")]
    Bus(#[from] zbus::Error),

    #[error("bus name {0} is queued behind its current owner")]
    Queued(String),

    #[error("failed to hand the launch over to the running instance: {0}")]
    Forward(#[source] zbus::Error),
}

/// Outcome of trying to become the primary instance.
pub enum Arbitration<G> {
    /// This process holds the lock for as long as it keeps the guard.
    Primary(G),
    /// Another process holds the lock and has been given our arguments.
    Secondary,
}

pub trait InstanceLock {
    type Guard;

    /// Try to take the process-wide lock.
    ///
    /// As primary, later launches arrive on `events`. As secondary, `argv`
    /// has already been forwarded to the primary when this returns.
    fn acquire(
        &self,
        argv: &[String],
        events: Sender<SessionEvent>,
    ) -> Result<Arbitration<Self::Guard>, InstanceError>;
}

/// Object path the shell is served at, derived from its bus name:
/// `org.cadenza.Player` becomes `/org/cadenza/Player`.
pub fn object_path(bus_name: &str) -> String {
    let mut path = String::with_capacity(bus_name.len() + 1);
    for part in bus_name.split('.') {
        path.push('/');
        path.extend(part.chars().map(|c| if c == '-' { '_' } else { c }));
    }
    path
}

#[cfg(test)]
pub(crate) mod tests;
