use std::collections::HashMap;
use std::sync::mpsc::Sender;

use async_io::block_on;
use zbus::fdo::{RequestNameFlags, RequestNameReply};
use zbus::{Connection, interface};
use zvariant::OwnedValue;

use crate::launch::{LaunchOrigin, LaunchTarget};
use crate::session::SessionEvent;

use super::{Arbitration, InstanceError, InstanceLock, object_path};

pub(crate) const INSTANCE_INTERFACE: &str = "org.cadenza.Player.Instance";

/// Instance lock backed by ownership of a well-known session bus name.
pub struct BusLock {
    bus_name: String,
}

impl BusLock {
    pub fn new(bus_name: impl Into<String>) -> Self {
        Self {
            bus_name: bus_name.into(),
        }
    }

    async fn acquire_async(
        &self,
        argv: &[String],
        events: Sender<SessionEvent>,
    ) -> Result<Arbitration<BusHost>, InstanceError> {
        let path = object_path(&self.bus_name);
        let connection = Connection::session().await?;

        // Serve before owning the name so a racing second launch never finds
        // the name without the interface behind it.
        let object_server = connection.object_server();
        object_server
            .at(
                path.as_str(),
                InstanceIface {
                    events: events.clone(),
                },
            )
            .await?;
        object_server
            .at(path.as_str(), ApplicationIface { events })
            .await?;

        let reply = connection
            .request_name_with_flags(self.bus_name.as_str(), RequestNameFlags::DoNotQueue.into())
            .await;

        match name_outcome(reply, &self.bus_name)? {
            NameOutcome::Owned => {
                tracing::info!("acquired instance lock {}", self.bus_name);
                Ok(Arbitration::Primary(BusHost {
                    connection,
                    bus_name: self.bus_name.clone(),
                    path,
                }))
            }
            NameOutcome::Taken => {
                tracing::info!("{} is already running, forwarding launch", self.bus_name);
                connection
                    .call_method(
                        Some(self.bus_name.as_str()),
                        path.as_str(),
                        Some(INSTANCE_INTERFACE),
                        "CommandLine",
                        &(argv.to_vec(),),
                    )
                    .await
                    .map_err(InstanceError::Forward)?;
                Ok(Arbitration::Secondary)
            }
        }
    }
}

/// Who owns the bus name after a `RequestName` call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum NameOutcome {
    Owned,
    Taken,
}

pub(super) fn name_outcome(
    reply: zbus::Result<RequestNameReply>,
    bus_name: &str,
) -> Result<NameOutcome, InstanceError> {
    match reply {
        Ok(RequestNameReply::PrimaryOwner | RequestNameReply::AlreadyOwner) => {
            Ok(NameOutcome::Owned)
        }
        Ok(RequestNameReply::Exists) | Err(zbus::Error::NameTaken) => Ok(NameOutcome::Taken),
        Ok(RequestNameReply::InQueue) => Err(InstanceError::Queued(bus_name.to_string())),
        Err(e) => Err(e.into()),
    }
}

impl InstanceLock for BusLock {
    type Guard = BusHost;

    fn acquire(
        &self,
        argv: &[String],
        events: Sender<SessionEvent>,
    ) -> Result<Arbitration<BusHost>, InstanceError> {
        block_on(self.acquire_async(argv, events))
    }
}

/// The primary instance's bus connection. The name is released when this is
/// dropped.
pub struct BusHost {
    connection: Connection,
    bus_name: String,
    path: String,
}

impl BusHost {
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Receives the command lines of later launches.
pub(super) struct InstanceIface {
    pub(super) events: Sender<SessionEvent>,
}

#[interface(name = "org.cadenza.Player.Instance")]
impl InstanceIface {
    pub(super) fn command_line(&self, argv: Vec<String>) {
        tracing::info!("second launch: {argv:?}");
        let target = LaunchTarget::from_args(LaunchOrigin::SecondInstance, &argv);
        let _ = self.events.send(SessionEvent::Launch(target));
    }
}

/// `org.freedesktop.Application`, which desktop environments use to open
/// files in an already running application.
pub(super) struct ApplicationIface {
    pub(super) events: Sender<SessionEvent>,
}

#[interface(name = "org.freedesktop.Application")]
impl ApplicationIface {
    pub(super) fn activate(&self, _platform_data: HashMap<String, OwnedValue>) {
        let _ = self.events.send(SessionEvent::Raise);
    }

    pub(super) fn open(&self, uris: Vec<String>, _platform_data: HashMap<String, OwnedValue>) {
        tracing::info!("open request: {uris:?}");
        let _ = self
            .events
            .send(SessionEvent::Launch(LaunchTarget::from_uris(&uris)));
    }

    pub(super) fn activate_action(
        &self,
        action_name: String,
        _parameter: Vec<OwnedValue>,
        _platform_data: HashMap<String, OwnedValue>,
    ) {
        tracing::debug!("ignoring unsupported action {action_name}");
    }
}
