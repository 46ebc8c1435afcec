//! # pklot-state: Guarded State Machines
//!
//! Each machine is an enum state with validated transition methods that
//! return `Result`. Invalid transitions are rejected with structured errors
//! naming the current state and the attempted one; nothing is overwritten
//! silently.
//!
//! ## State Machines
//!
//! - **Spot** (`spot.rs`): `FREE ⇄ OCCUPIED`. `park` only succeeds from
//!   FREE and only for a vehicle of the spot's type. `vacate` on a FREE spot
//!   is a logged no-op.
//!
//! - **Ticket** (`ticket.rs`): `ACTIVE → REDEEMED` (terminal). A ticket can
//!   be redeemed once.

pub mod spot;
pub mod ticket;

pub use spot::{ParkingSpot, SpotError, SpotState, SpotTransitionRecord};
pub use ticket::{Ticket, TicketError, TicketState};
