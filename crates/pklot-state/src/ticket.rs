//! # Ticket Lifecycle
//!
//! ```text
//! ACTIVE ──redeem(fee, at)──▶ REDEEMED (terminal)
//! ```
//!
//! A ticket binds a vehicle to a spot from the instant it was issued. It
//! does not own the vehicle (the spot does); it refers to it by id and
//! keeps the plate and type for display and fee lookup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pklot_core::{
    ErrorKind, Fee, SpotLocation, TicketId, Timestamp, Vehicle, VehicleId, VehicleType,
};

/// Lifecycle state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketState {
    /// Issued, vehicle still in the lot.
    Active,
    /// Paid and exited (terminal).
    Redeemed,
}

impl TicketState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Redeemed)
    }
}

impl std::fmt::Display for TicketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Redeemed => "REDEEMED",
        };
        f.write_str(s)
    }
}

/// Rejected ticket transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// The ticket was already used to exit.
    #[error("{ticket_id} was already redeemed at {redeemed_at}")]
    AlreadyRedeemed {
        /// The ticket.
        ticket_id: TicketId,
        /// When it was redeemed.
        redeemed_at: Timestamp,
    },
}

impl TicketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyRedeemed { .. } => ErrorKind::InconsistentState,
        }
    }
}

/// A parking ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    spot: SpotLocation,
    vehicle_id: VehicleId,
    license_plate: String,
    vehicle_type: VehicleType,
    issued_at: Timestamp,
    state: TicketState,
    redeemed_at: Option<Timestamp>,
    fee_charged: Option<Fee>,
}

impl Ticket {
    /// Issue an ACTIVE ticket for `vehicle` parked at `spot`.
    pub fn issue(spot: SpotLocation, vehicle: &Vehicle, issued_at: Timestamp) -> Self {
        Self {
            id: TicketId::new(),
            spot,
            vehicle_id: vehicle.id(),
            license_plate: vehicle.license_plate().to_string(),
            vehicle_type: vehicle.vehicle_type(),
            issued_at,
            state: TicketState::Active,
            redeemed_at: None,
            fee_charged: None,
        }
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn spot(&self) -> SpotLocation {
        self.spot
    }

    pub fn vehicle_id(&self) -> VehicleId {
        self.vehicle_id
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    pub fn issued_at(&self) -> Timestamp {
        self.issued_at
    }

    pub fn state(&self) -> TicketState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TicketState::Active
    }

    pub fn redeemed_at(&self) -> Option<Timestamp> {
        self.redeemed_at
    }

    pub fn fee_charged(&self) -> Option<Fee> {
        self.fee_charged
    }

    /// Whole hours between issuance and `now`, rounded down.
    pub fn calculate_hours(&self, now: Timestamp) -> u64 {
        now.whole_hours_since(&self.issued_at)
    }

    /// Mark the ticket as paid and used (ACTIVE → REDEEMED).
    pub fn redeem(&mut self, fee: Fee, at: Timestamp) -> Result<(), TicketError> {
        if let Some(redeemed_at) = self.redeemed_at {
            return Err(TicketError::AlreadyRedeemed {
                ticket_id: self.id,
                redeemed_at,
            });
        }
        self.state = TicketState::Redeemed;
        self.redeemed_at = Some(at);
        self.fee_charged = Some(fee);
        Ok(())
    }
}
