//! # pklot-cli: Parking Lot CLI
//!
//! Provides the `pklot` command-line interface over the facility crates.
//!
//! ## Subcommands
//!
//! - `pklot demo`: One vehicle in, a simulated stay, the same vehicle out.
//! - `pklot layout`: Floors and spots of a configured lot.
//! - `pklot session`: Replay a gate script against one lot.
//!
//! ```bash
//! pklot demo --vehicle-type CAR --hours 5
//! pklot layout --config lot.yaml --json
//! pklot session --script morning.txt -v
//! ```

pub mod demo;
pub mod layout;
pub mod session;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use pklot_core::{ManualClock, Timestamp};
use pklot_facility::LotConfig;

/// Simulated clock start used when the configuration does not set one.
pub const DEFAULT_CLOCK_START: &str = "2025-05-17T10:30:00Z";

/// Load the lot configuration, or the built-in layout when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<LotConfig> {
    match path {
        Some(path) => LotConfig::from_path(path)
            .with_context(|| format!("failed to load lot configuration {}", path.display())),
        None => Ok(LotConfig::default()),
    }
}

/// A manual clock starting at the configured instant.
pub fn manual_clock(config: &LotConfig) -> Result<Arc<ManualClock>> {
    let start = match config.clock_start()? {
        Some(start) => start,
        None => Timestamp::parse(DEFAULT_CLOCK_START)?,
    };
    Ok(Arc::new(ManualClock::new(start)))
}
