//! # Error Types: Shared Error Taxonomy
//!
//! Every error in the stack maps onto one of three [`ErrorKind`]s so callers
//! can branch programmatically instead of parsing messages:
//!
//! - `CapacityExhausted`: no free spot of the requested type. Expected.
//! - `InvalidArgument`: bad input at the boundary (unknown tag, blank plate,
//!   unknown ticket).
//! - `InconsistentState`: the request contradicts current state (spot
//!   already occupied, ticket already redeemed, vehicle mismatch).
//!
//! Downstream crates define their own `thiserror` enums and expose a
//! `kind()` accessor returning this enum.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::VehicleType;

/// Closed classification of every failure in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// No free spot matches the request.
    CapacityExhausted,
    /// Input rejected at the boundary.
    InvalidArgument,
    /// The operation contradicts the current lot or ticket state.
    InconsistentState,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CapacityExhausted => "CAPACITY_EXHAUSTED",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InconsistentState => "INCONSISTENT_STATE",
        };
        f.write_str(s)
    }
}

/// Errors raised by the foundational types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PklotError {
    /// A vehicle type tag outside the supported set.
    #[error("unsupported vehicle type: {0:?}")]
    UnsupportedVehicleType(String),

    /// A payment method tag outside the supported set.
    #[error("unsupported payment method: {0:?}")]
    UnsupportedPaymentMethod(String),

    /// Generic boundary validation failure (blank plate, malformed timestamp).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No free spot of the requested type on any floor.
    #[error("no free spot available for vehicle type {0}")]
    CapacityExhausted(VehicleType),
}

impl PklotError {
    /// The taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedVehicleType(_)
            | Self::UnsupportedPaymentMethod(_)
            | Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::CapacityExhausted(_) => ErrorKind::CapacityExhausted,
        }
    }
}
