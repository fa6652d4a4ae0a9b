use std::path::PathBuf;

use clap::Parser;

/// Host process for the cadenza audio player.
///
/// Opening a file while cadenza is already running replaces the running
/// instance's playlist instead of starting a second one.
#[derive(Debug, Parser)]
#[command(name = "cadenza", version, about)]
pub struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/cadenza/config.toml`)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log: String,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Audio file to open; when several are given the last one is used
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}
