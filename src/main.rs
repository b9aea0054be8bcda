#![forbid(unsafe_code)]

mod config;
mod constants;
mod dat151;
mod doors;
mod gui;
mod types;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use config::SettingsStore;
use doors::DoorCollection;

/// Editor for GTA V door audio settings (Dat151 XML)
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file to use instead of the default search path
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the editor window (default)
    Gui,
    /// Print the DoorAudioSettingsLink name for each door name
    Hash {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List the doors found in a Dat151 XML file
    Inspect { file: PathBuf },
}

fn init_logging() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_hashes(names: &[String]) {
    for name in names {
        println!("{name}\t{}", dat151::link_name(name));
    }
}

fn inspect(file: &Path) -> Result<()> {
    let mut doors = DoorCollection::new();
    let summary = dat151::import_into(&mut doors, file)?;
    info!(doors = doors.len(), replaced = summary.replaced, "Inspected file");

    for (idx, door) in doors.iter().enumerate() {
        println!(
            "{:>3} | {} | sounds={} tuning={} max_occlusion={:.2}",
            idx + 1,
            door.name,
            door.sounds,
            door.tuning_params,
            door.max_occlusion
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => {
            let store = SettingsStore::open(cli.settings);
            gui::run_gui(store)
        }
        Command::Hash { names } => {
            print_hashes(&names);
            Ok(())
        }
        Command::Inspect { file } => inspect(&file),
    }
}
