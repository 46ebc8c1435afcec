//! # Domain Tags: Vehicle Types and Payment Methods
//!
//! The two closed tag sets of the system. Each is the ONE definition used
//! across the stack; every `match` on them must be exhaustive, so adding a
//! vehicle category or payment method forces every consumer (spot
//! compatibility, fee rates, payment dispatch) to handle it at compile time.
//!
//! Tags arriving as text (CLI arguments, config files, scripts) are parsed
//! with `FromStr`. Parsing is case-insensitive and treats `-` like `_`.
//! Anything outside the set is rejected with a typed error rather than
//! falling through to a default.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PklotError;

/// Normalize a textual tag: trim, upper-case, `-` → `_`.
fn normalize_tag(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}

// ─── Vehicle Type ────────────────────────────────────────────────────

/// Category of a vehicle. Determines spot compatibility and hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    /// Two-wheeler. 10 units per hour.
    Bike,
    /// Passenger car. 20 units per hour.
    Car,
}

impl VehicleType {
    /// All vehicle types in canonical order (bikes first, matching floor layout).
    pub fn all() -> &'static [VehicleType] {
        &[Self::Bike, Self::Car]
    }

    /// Hourly parking rate in whole currency units.
    pub fn hourly_rate(&self) -> u64 {
        match self {
            Self::Bike => 10,
            Self::Car => 20,
        }
    }

    /// Canonical tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bike => "BIKE",
            Self::Car => "CAR",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = PklotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "BIKE" => Ok(Self::Bike),
            "CAR" => Ok(Self::Car),
            _ => Err(PklotError::UnsupportedVehicleType(s.to_string())),
        }
    }
}

// ─── Payment Method ──────────────────────────────────────────────────

/// How a parking fee is settled at the exit gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash at the booth.
    Cash,
    /// Credit card terminal.
    CreditCard,
    /// Unified Payments Interface transfer.
    Upi,
}

impl PaymentMethod {
    /// All payment methods in canonical order.
    pub fn all() -> &'static [PaymentMethod] {
        &[Self::Cash, Self::CreditCard, Self::Upi]
    }

    /// Canonical tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::CreditCard => "CREDIT_CARD",
            Self::Upi => "UPI",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PklotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "CASH" => Ok(Self::Cash),
            "CREDIT_CARD" | "CREDITCARD" => Ok(Self::CreditCard),
            "UPI" => Ok(Self::Upi),
            _ => Err(PklotError::UnsupportedPaymentMethod(s.to_string())),
        }
    }
}
