use std::io;
use std::process::Command;
use std::sync::mpsc::Sender;
use std::thread;

use crate::session::{SessionEvent, WindowCommand};

/// Launch the UI process described by `command`, if any.
///
/// The UI finds the host through `CADENZA_BUS_NAME`. When it exits the
/// session is closed.
pub fn spawn(command: &[String], bus_name: &str, events: Sender<SessionEvent>) -> io::Result<()> {
    let Some((program, args)) = command.split_first() else {
        tracing::info!("no UI command configured, waiting for a UI to connect");
        return Ok(());
    };

    let mut child = Command::new(program)
        .args(args)
        .env("CADENZA_BUS_NAME", bus_name)
        .spawn()?;
    tracing::info!("started UI process {program} (pid {})", child.id());

    thread::Builder::new()
        .name("ui-watch".into())
        .spawn(move || {
            match child.wait() {
                Ok(status) => tracing::info!("UI process exited: {status}"),
                Err(e) => tracing::warn!("lost track of UI process: {e}"),
            }
            let _ = events.send(SessionEvent::Window(WindowCommand::Close));
        })?;

    Ok(())
}
