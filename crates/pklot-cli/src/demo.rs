//! # Demo Subcommand
//!
//! Admits one vehicle, advances the simulated clock by the requested stay,
//! then processes its exit. Exit code 1 when the lot has no spot for the
//! vehicle's type.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use pklot_core::{PaymentMethod, VehicleType};
use pklot_facility::{EntranceGate, ExitGate, ExitReceipt, ParkingLot};
use pklot_payment::PaymentService;
use pklot_state::Ticket;

use crate::{load_config, manual_clock};

/// Arguments for the `pklot demo` subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Lot configuration (YAML). Defaults to one floor, 2 bike + 2 car spots.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// License plate of the demo vehicle.
    #[arg(long, default_value = "DL9CBB6391")]
    pub plate: String,

    /// Vehicle type (BIKE or CAR).
    #[arg(long, default_value = "CAR")]
    pub vehicle_type: VehicleType,

    /// Payment method (CASH, CREDIT_CARD or UPI).
    #[arg(long, default_value = "UPI")]
    pub payment_method: PaymentMethod,

    /// Length of the simulated stay in whole hours.
    #[arg(long, default_value_t = 5)]
    pub hours: u32,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// What happened during the demo.
#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub ticket: Option<Ticket>,
    pub exit: Option<ExitReceipt>,
}

/// Execute the demo subcommand.
pub fn run_demo(args: &DemoArgs) -> Result<u8> {
    let report = demo_report(args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(if report.ticket.is_some() { 0 } else { 1 })
}

/// Run entrance, stay and exit and collect the outcome.
pub fn demo_report(args: &DemoArgs) -> Result<DemoReport> {
    let config = load_config(args.config.as_deref())?;
    let mut lot: ParkingLot = config.build_lot()?;
    let clock = manual_clock(&config)?;
    let entrance = EntranceGate::new(clock.clone());
    let exit = ExitGate::new(clock.clone(), PaymentService::new());

    let Some(ticket) = entrance
        .process_entrance(&mut lot, &args.plate, args.vehicle_type)
        .context("entrance failed")?
    else {
        return Ok(DemoReport {
            ticket: None,
            exit: None,
        });
    };

    clock.advance_hours(args.hours);
    let receipt = exit
        .process_exit(&mut lot, &ticket.id(), args.payment_method)
        .context("exit failed")?;

    Ok(DemoReport {
        ticket: Some(ticket),
        exit: Some(receipt),
    })
}

fn print_report(report: &DemoReport) {
    let Some(ticket) = &report.ticket else {
        println!("No spot available.");
        return;
    };
    println!("Ticket: {}", ticket.id());
    println!("  Vehicle: {} ({})", ticket.license_plate(), ticket.vehicle_type());
    println!("  Spot: {}", ticket.spot());
    println!("  Entry: {}", ticket.issued_at());
    if let Some(receipt) = &report.exit {
        println!("Exit after {} h", receipt.hours);
        println!("  Fee: {}", receipt.fee);
        println!(
            "  Paid: {} via {}",
            receipt.payment.amount, receipt.payment.method
        );
        println!("  Spot {} is free again", receipt.spot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pklot_core::SpotLocation;
    use std::io::Write;

    fn args() -> DemoArgs {
        DemoArgs {
            config: None,
            plate: "DL9CBB6391".into(),
            vehicle_type: VehicleType::Car,
            payment_method: PaymentMethod::Upi,
            hours: 5,
            json: false,
        }
    }

    #[test]
    fn demo_default_car_pays_100() {
        let report = demo_report(&args()).unwrap();
        let ticket = report.ticket.unwrap();
        assert_eq!(ticket.spot(), SpotLocation::new(1, 3));
        let receipt = report.exit.unwrap();
        assert_eq!(receipt.fee, 100);
        assert_eq!(receipt.payment.method, PaymentMethod::Upi);
    }

    #[test]
    fn demo_bike_uses_first_spot() {
        let mut a = args();
        a.vehicle_type = VehicleType::Bike;
        a.hours = 3;
        let report = demo_report(&a).unwrap();
        assert_eq!(report.ticket.unwrap().spot(), SpotLocation::new(1, 1));
        assert_eq!(report.exit.unwrap().fee, 30);
    }

    #[test]
    fn demo_without_bike_spots_exits_1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lot.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "floors:\n  - floor_number: 1\n    car_spots: 2").unwrap();

        let mut a = args();
        a.config = Some(path);
        a.vehicle_type = VehicleType::Bike;
        let report = demo_report(&a).unwrap();
        assert!(report.ticket.is_none());
        assert!(report.exit.is_none());
        assert_eq!(run_demo(&a).unwrap(), 1);
    }

    #[test]
    fn demo_blank_plate_is_error() {
        let mut a = args();
        a.plate = " ".into();
        assert!(run_demo(&a).is_err());
    }
}
