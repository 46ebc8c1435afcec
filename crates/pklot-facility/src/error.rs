//! Facility error type.
//!
//! Folds the errors of the lower crates into one enum so gate callers match
//! on a single type, and maps every variant onto [`ErrorKind`].

use thiserror::Error;

use pklot_core::{ErrorKind, PklotError, SpotLocation, TicketId};
use pklot_payment::PaymentError;
use pklot_state::{SpotError, TicketError};

/// Errors from lot, registry, gate, and config operations.
#[derive(Error, Debug)]
pub enum LotError {
    /// Boundary validation failed in the core types.
    #[error(transparent)]
    Core(#[from] PklotError),

    /// A spot refused a transition.
    #[error(transparent)]
    Spot(#[from] SpotError),

    /// A ticket refused a transition.
    #[error(transparent)]
    Ticket(#[from] TicketError),

    /// Payment failed; nothing was vacated.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// No spot exists at this location.
    #[error("no spot at {0}")]
    UnknownSpot(SpotLocation),

    /// The registry has no such ticket.
    #[error("unknown {0}")]
    UnknownTicket(TicketId),

    /// Vacate refused: spot free, or held by a different vehicle.
    #[error("invalid operation on spot {location}: {reason}")]
    InvalidVacate {
        /// The spot.
        location: SpotLocation,
        /// Why it was refused.
        reason: String,
    },

    /// Lot configuration is unreadable or invalid.
    #[error("invalid lot configuration: {0}")]
    Config(String),
}

impl LotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            Self::Spot(e) => e.kind(),
            Self::Ticket(e) => e.kind(),
            Self::Payment(e) => e.kind(),
            Self::UnknownSpot(_) | Self::UnknownTicket(_) | Self::Config(_) => {
                ErrorKind::InvalidArgument
            }
            Self::InvalidVacate { .. } => ErrorKind::InconsistentState,
        }
    }
}
