use std::env;
use std::path;
use std::sync::mpsc;

use crate::cli::Cli;
use crate::instance::BusLock;
use crate::ipc;
use crate::session::{Session, SessionEvent};

mod settings;
mod startup;
mod ui_process;

pub fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings(cli.config.as_deref());
    if cli.print_config {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    let argv = launch_argv(cli);

    let (events_tx, events_rx) = mpsc::channel::<SessionEvent>();
    let lock = BusLock::new(settings.instance.bus_name.clone());
    let Some(host) = startup::acquire(&lock, &argv, events_tx.clone())? else {
        return Ok(());
    };

    let surface = ipc::serve(&host, events_tx.clone(), settings.library.clone())?;
    let mut session = Session::new(surface, settings.library.clone());

    ui_process::spawn(&settings.ui.command, host.bus_name(), events_tx.clone())?;
    // The bus interfaces hold their own senders.
    drop(events_tx);

    session.run(&events_rx);
    tracing::debug!(phase = ?session.phase(), "releasing instance lock");
    drop(host);
    Ok(())
}

/// Program name followed by the positional files, without options. This is
/// what gets forwarded to an already running instance, so the files are made
/// absolute against this process's working directory.
fn launch_argv(cli: &Cli) -> Vec<String> {
    let program = env::args().next().unwrap_or_else(|| "cadenza".to_string());
    let files = cli.files.iter().filter_map(|file| {
        let file = path::absolute(file).unwrap_or_else(|_| file.clone());
        match file.into_os_string().into_string() {
            Ok(file) => Some(file),
            Err(raw) => {
                tracing::warn!("skipping non UTF-8 argument {raw:?}");
                None
            }
        }
    });
    std::iter::once(program).chain(files).collect()
}
