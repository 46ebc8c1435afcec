//! # Session Subcommand
//!
//! Replays a gate script against one lot and one manual clock.
//!
//! ## Script Format
//!
//! One command per line; blank lines and `#` comments are ignored.
//!
//! ```text
//! enter DL9CBB6391 CAR      # admit a vehicle
//! advance 5                 # move the clock forward 5 hours
//! exit DL9CBB6391 UPI       # exit the plate's oldest active ticket
//! status                    # occupancy snapshot
//! ```
//!
//! The first failing line aborts the replay with its line number.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use serde::Serialize;

use pklot_core::{Clock, ManualClock, SpotLocation, TicketId, Timestamp};
use pklot_facility::{EntranceGate, ExitGate, ExitReceipt, LotConfig, OccupancySummary, ParkingLot};
use pklot_payment::PaymentService;

use crate::{load_config, manual_clock};

/// Arguments for the `pklot session` subcommand.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Script file to replay.
    #[arg(long)]
    pub script: PathBuf,

    /// Lot configuration (YAML). Defaults to one floor, 2 bike + 2 car spots.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print events as JSON.
    #[arg(long)]
    pub json: bool,
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Enter { plate: String, vehicle_type: String },
    Advance { hours: u32 },
    Exit { plate: String, method: String },
    Status,
}

impl ScriptCommand {
    /// Parse one line. `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.split('#').next().unwrap_or_default().trim();
        let words: Vec<&str> = line.split_whitespace().collect();
        let command = match words.as_slice() {
            [] => return Ok(None),
            ["enter", plate, vehicle_type] => Self::Enter {
                plate: (*plate).to_string(),
                vehicle_type: (*vehicle_type).to_string(),
            },
            ["advance", hours] => Self::Advance {
                hours: hours
                    .parse()
                    .with_context(|| format!("invalid hour count {hours:?}"))?,
            },
            ["exit", plate, method] => Self::Exit {
                plate: (*plate).to_string(),
                method: (*method).to_string(),
            },
            ["status"] => Self::Status,
            [verb, ..] => bail!("unrecognized command {verb:?} (expected enter, advance, exit or status)"),
        };
        Ok(Some(command))
    }
}

/// What a script line did.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Entered {
        plate: String,
        ticket_id: TicketId,
        spot: SpotLocation,
        at: Timestamp,
    },
    Refused {
        plate: String,
        vehicle_type: String,
    },
    Advanced {
        hours: u32,
        now: Timestamp,
    },
    Exited(ExitReceipt),
    Status {
        now: Timestamp,
        active_tickets: usize,
        occupancy: Vec<OccupancySummary>,
    },
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entered {
                plate, spot, at, ..
            } => write!(f, "{plate} parked at {spot} ({at})"),
            Self::Refused {
                plate,
                vehicle_type,
            } => write!(f, "{plate}: no {vehicle_type} spot available"),
            Self::Advanced { hours, now } => write!(f, "clock +{hours}h, now {now}"),
            Self::Exited(r) => write!(
                f,
                "{} left {} after {}h, paid {} via {}",
                r.license_plate, r.spot, r.hours, r.payment.amount, r.payment.method
            ),
            Self::Status {
                active_tickets,
                occupancy,
                ..
            } => {
                write!(f, "{active_tickets} active ticket(s)")?;
                for o in occupancy {
                    write!(f, ", {} {}/{} free", o.vehicle_type, o.free, o.capacity)?;
                }
                Ok(())
            }
        }
    }
}

/// One lot, its gates and the clock driving them.
#[derive(Debug)]
pub struct Session {
    clock: Arc<ManualClock>,
    lot: ParkingLot,
    entrance: EntranceGate,
    exit: ExitGate,
}

impl Session {
    pub fn new(config: &LotConfig) -> Result<Self> {
        let clock = manual_clock(config)?;
        Ok(Self {
            lot: config.build_lot()?,
            entrance: EntranceGate::new(clock.clone()),
            exit: ExitGate::new(clock.clone(), PaymentService::new()),
            clock,
        })
    }

    pub fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    pub fn apply(&mut self, command: &ScriptCommand) -> Result<SessionEvent> {
        match command {
            ScriptCommand::Enter {
                plate,
                vehicle_type,
            } => {
                let ticket =
                    self.entrance
                        .process_entrance_tag(&mut self.lot, plate, vehicle_type)?;
                Ok(match ticket {
                    Some(t) => SessionEvent::Entered {
                        plate: t.license_plate().to_string(),
                        ticket_id: t.id(),
                        spot: t.spot(),
                        at: t.issued_at(),
                    },
                    None => SessionEvent::Refused {
                        plate: plate.clone(),
                        vehicle_type: vehicle_type.clone(),
                    },
                })
            }
            ScriptCommand::Advance { hours } => {
                self.clock.advance_hours(*hours);
                Ok(SessionEvent::Advanced {
                    hours: *hours,
                    now: self.clock.now(),
                })
            }
            ScriptCommand::Exit { plate, method } => {
                let ticket_id = self
                    .lot
                    .tickets()
                    .find_active_by_plate(plate)
                    .map(|t| t.id())
                    .ok_or_else(|| anyhow!("no active ticket for plate {plate}"))?;
                let receipt = self.exit.process_exit_tag(&mut self.lot, &ticket_id, method)?;
                Ok(SessionEvent::Exited(receipt))
            }
            ScriptCommand::Status => Ok(SessionEvent::Status {
                now: self.clock.now(),
                active_tickets: self.lot.tickets().active().len(),
                occupancy: self.lot.occupancy(),
            }),
        }
    }

    /// Run every line of `script`, stopping at the first failure.
    pub fn replay(&mut self, script: &str) -> Result<Vec<SessionEvent>> {
        let mut events = Vec::new();
        for (index, line) in script.lines().enumerate() {
            let line_no = index + 1;
            let Some(command) =
                ScriptCommand::parse(line).with_context(|| format!("line {line_no}"))?
            else {
                continue;
            };
            tracing::debug!(line = line_no, ?command, "applying script line");
            let event = self
                .apply(&command)
                .with_context(|| format!("line {line_no}: {}", line.trim()))?;
            events.push(event);
        }
        Ok(events)
    }
}

/// Execute the session subcommand.
pub fn run_session(args: &SessionArgs) -> Result<u8> {
    let config = load_config(args.config.as_deref())?;
    let events = replay_file(&config, &args.script)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        for event in &events {
            println!("{event}");
        }
    }
    Ok(0)
}

fn replay_file(config: &LotConfig, script: &Path) -> Result<Vec<SessionEvent>> {
    let text = std::fs::read_to_string(script)
        .with_context(|| format!("cannot read script {}", script.display()))?;
    Session::new(config)?.replay(&text)
}
