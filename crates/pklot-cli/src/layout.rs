//! # Layout Subcommand
//!
//! Prints the floors and spots a configuration produces, with per-type
//! capacity totals.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use pklot_core::VehicleType;
use pklot_facility::{OccupancySummary, ParkingLot};

use crate::load_config;

/// Arguments for the `pklot layout` subcommand.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Lot configuration (YAML). Defaults to one floor, 2 bike + 2 car spots.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the layout as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SpotView {
    pub spot_number: u32,
    pub spot_type: VehicleType,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FloorView {
    pub floor_number: u32,
    pub spots: Vec<SpotView>,
}

#[derive(Debug, Serialize)]
pub struct LayoutView {
    pub floors: Vec<FloorView>,
    pub totals: Vec<OccupancySummary>,
}

impl LayoutView {
    pub fn of(lot: &ParkingLot) -> Self {
        let floors = lot
            .floors()
            .iter()
            .map(|f| FloorView {
                floor_number: f.floor_number(),
                spots: f
                    .spots()
                    .iter()
                    .map(|s| SpotView {
                        spot_number: s.spot_number(),
                        spot_type: s.spot_type(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            floors,
            totals: lot.occupancy(),
        }
    }
}

/// Execute the layout subcommand.
pub fn run_layout(args: &LayoutArgs) -> Result<u8> {
    let config = load_config(args.config.as_deref())?;
    let lot = config.build_lot()?;
    let view = LayoutView::of(&lot);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(0);
    }

    for floor in &view.floors {
        println!("Floor {}", floor.floor_number);
        for spot in &floor.spots {
            println!("  #{:<4} {}", spot.spot_number, spot.spot_type);
        }
    }
    for total in &view.totals {
        println!("{}: {} spots", total.vehicle_type, total.capacity);
    }
    Ok(0)
}
