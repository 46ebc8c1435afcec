//! # Payment Strategy Trait
//!
//! Defines the interface every fee-collection behaviour satisfies. The
//! built-in strategies cannot fail; the `Result` return is there so a real
//! gateway can decline without changing the exit gate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pklot_core::{ErrorKind, Fee, PaymentMethod};

/// Error during payment processing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The method tag is not one of CASH, CREDIT_CARD, UPI.
    #[error("unsupported payment method: {0:?}")]
    UnsupportedMethod(String),

    /// The strategy refused the charge.
    #[error("payment of {amount} via {method} declined: {reason}")]
    Declined {
        /// Method that declined.
        method: PaymentMethod,
        /// Amount that was attempted.
        amount: Fee,
        /// Why it was declined.
        reason: String,
    },
}

impl PaymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedMethod(_) => ErrorKind::InvalidArgument,
            Self::Declined { .. } => ErrorKind::InconsistentState,
        }
    }
}

/// Proof that a strategy accepted a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Method used.
    pub method: PaymentMethod,
    /// Amount charged, in whole currency units.
    pub amount: Fee,
}

/// An interchangeable fee-collection behaviour.
pub trait PaymentStrategy: Send + Sync + std::fmt::Debug {
    /// The method this strategy serves.
    fn method(&self) -> PaymentMethod;

    /// Collect `amount`.
    fn process_payment(&self, amount: Fee) -> Result<PaymentReceipt, PaymentError>;
}
