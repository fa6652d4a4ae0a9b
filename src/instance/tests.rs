use super::bus::{ApplicationIface, InstanceIface, NameOutcome, name_outcome};
use super::*;
use crate::launch::{LaunchOrigin, LaunchTarget};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use zbus::fdo::RequestNameReply;

/// In-process stand-in for the bus name: the first caller owns it, later
/// callers send their launch to the owner.
#[derive(Clone, Default)]
pub(crate) struct MemoryLock {
    owner: Arc<Mutex<Option<Sender<SessionEvent>>>>,
}

pub(crate) struct MemoryGuard;

impl InstanceLock for MemoryLock {
    type Guard = MemoryGuard;

    fn acquire(
        &self,
        argv: &[String],
        events: Sender<SessionEvent>,
    ) -> Result<Arbitration<MemoryGuard>, InstanceError> {
        let mut owner = self.owner.lock().unwrap();
        match owner.as_ref() {
            Some(primary) => {
                let target = LaunchTarget::from_args(LaunchOrigin::SecondInstance, argv);
                let _ = primary.send(SessionEvent::Launch(target));
                Ok(Arbitration::Secondary)
            }
            None => {
                *owner = Some(events);
                Ok(Arbitration::Primary(MemoryGuard))
            }
        }
    }
}

#[test]
fn object_path_mirrors_bus_name() {
    assert_eq!(object_path("org.cadenza.Player"), "/org/cadenza/Player");
    assert_eq!(object_path("io.github.my-app"), "/io/github/my_app");
}

#[test]
fn command_line_becomes_second_instance_launch() {
    let (tx, rx) = mpsc::channel();
    let iface = InstanceIface { events: tx };

    iface.command_line(vec!["cadenza".into(), "/music/b.mp3".into()]);

    let event = rx.try_recv().unwrap();
    assert_eq!(
        event,
        SessionEvent::Launch(LaunchTarget {
            origin: LaunchOrigin::SecondInstance,
            path: Some(PathBuf::from("/music/b.mp3")),
        })
    );
}

#[test]
fn application_open_becomes_open_file_launch() {
    let (tx, rx) = mpsc::channel();
    let iface = ApplicationIface { events: tx };

    iface.open(vec!["file:///music/c.flac".into()], Default::default());
    iface.activate(Default::default());
    iface.activate_action("play".into(), Vec::new(), Default::default());

    assert_eq!(
        rx.try_recv().unwrap(),
        SessionEvent::Launch(LaunchTarget::from_open_file("/music/c.flac"))
    );
    assert_eq!(rx.try_recv().unwrap(), SessionEvent::Raise);
    assert!(rx.try_recv().is_err());
}

#[test]
fn memory_lock_admits_one_primary() {
    let lock = MemoryLock::default();
    let (tx1, rx1) = mpsc::channel();
    let (tx2, rx2) = mpsc::channel();

    assert!(matches!(
        lock.acquire(&["cadenza".into()], tx1),
        Ok(Arbitration::Primary(_))
    ));
    assert!(matches!(
        lock.acquire(&["cadenza".into(), "/x.mp3".into()], tx2),
        Ok(Arbitration::Secondary)
    ));

    assert!(matches!(rx1.try_recv(), Ok(SessionEvent::Launch(_))));
    assert!(rx2.try_recv().is_err());
}

#[test]
fn name_replies_map_to_ownership() {
    let name = "org.cadenza.Player";
    for reply in [RequestNameReply::PrimaryOwner, RequestNameReply::AlreadyOwner] {
        assert_eq!(name_outcome(Ok(reply), name).unwrap(), NameOutcome::Owned);
    }
    assert_eq!(
        name_outcome(Ok(RequestNameReply::Exists), name).unwrap(),
        NameOutcome::Taken
    );
    assert_eq!(
        name_outcome(Err(zbus::Error::NameTaken), name).unwrap(),
        NameOutcome::Taken
    );
}

#[test]
fn queued_or_failed_name_requests_are_errors() {
    let name = "org.cadenza.Player";
    assert!(matches!(
        name_outcome(Ok(RequestNameReply::InQueue), name),
        Err(InstanceError::Queued(n)) if n == name
    ));
    assert!(matches!(
        name_outcome(Err(zbus::Error::InvalidReply), name),
        Err(InstanceError::Bus(_))
    ));
}
