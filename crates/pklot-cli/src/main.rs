//! # pklot CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pklot_cli::demo::{run_demo, DemoArgs};
use pklot_cli::layout::{run_layout, LayoutArgs};
use pklot_cli::session::{run_session, SessionArgs};

/// Parking lot gate simulator.
///
/// Admits vehicles, allocates spots first-fit across floors, charges for
/// whole hours at the exit gate and frees the spot.
#[derive(Parser, Debug)]
#[command(name = "pklot", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Park one vehicle, simulate a stay, and process its exit.
    Demo(DemoArgs),

    /// Print the floors and spots of a lot configuration.
    Layout(LayoutArgs),

    /// Replay a script of entries, exits and clock advances.
    Session(SessionArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Demo(args) => run_demo(&args),
        Commands::Layout(args) => run_layout(&args),
        Commands::Session(args) => run_session(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
