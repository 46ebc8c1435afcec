//! # pklot-facility: Parking Facility Operations
//!
//! The lot/floor/spot hierarchy and the two gates that drive it.
//!
//! - **Floor** (`floor.rs`): a fixed row of spots, bike spots first, then
//!   car spots. First-free-spot search by type.
//!
//! - **Lot** (`lot.rs`): ordered floors plus the ticket registry. First-fit
//!   allocation across floors in registration order; guarded vacate that
//!   checks vehicle identity.
//!
//! - **Registry** (`registry.rs`): `TicketId → Ticket`. Redemption is
//!   recorded here, so a ticket cannot be used to exit twice.
//!
//! - **Gate** (`gate.rs`): `EntranceGate` (vehicle → spot → ticket) and
//!   `ExitGate` (ticket → hours → fee → payment → vacate → redeem).
//!
//! - **Config** (`config.rs`): YAML lot layout and optional simulated clock
//!   start.
//!
//! ## Crate Policy
//!
//! - Mutation goes through `&mut ParkingLot`; there is no interior
//!   mutability and no locking. One transaction completes before the next.
//! - Capacity exhaustion is `Ok(None)`, not an error.
//! - A failed exit leaves the lot and the registry untouched.

pub mod config;
pub mod error;
pub mod floor;
pub mod gate;
pub mod lot;
pub mod registry;

pub use config::{ClockConfig, FloorConfig, LotConfig};
pub use error::LotError;
pub use floor::ParkingFloor;
pub use gate::{EntranceGate, ExitGate, ExitReceipt};
pub use lot::{OccupancySummary, ParkingLot};
pub use registry::TicketRegistry;
