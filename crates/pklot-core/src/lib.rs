//! # pklot-core: Foundational Types for the Parking Lot Stack
//!
//! Every other crate in the workspace depends on `pklot-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed tag enums.** `VehicleType` and `PaymentMethod` are the only
//!    way to name a vehicle category or a payment method. Unknown tags are
//!    rejected at the parse boundary (`FromStr`), never carried inward.
//!
//! 2. **Newtype identifiers.** `VehicleId` and `TicketId` wrap UUIDs so a
//!    ticket id can never be passed where a vehicle id is expected.
//!    `SpotLocation` pairs a floor number with a spot number.
//!
//! 3. **Injectable time.** Nothing outside [`clock::SystemClock`] reads the
//!    wall clock. Gates receive a [`Clock`] so stays can be simulated.
//!
//! 4. **Integer money.** Fees are whole currency units (`Fee = u64`).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pklot-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod clock;
pub mod domain;
pub mod error;
pub mod identity;
pub mod temporal;
pub mod vehicle;

pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use domain::{PaymentMethod, VehicleType};
pub use error::{ErrorKind, PklotError};
pub use identity::{SpotLocation, TicketId, VehicleId};
pub use temporal::Timestamp;
pub use vehicle::{Fee, Vehicle, VehicleFactory};
