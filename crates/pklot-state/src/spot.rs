//! # Parking Spot State Machine
//!
//! One physical slot of parking capacity.
//!
//! ## States
//!
//! ```text
//! FREE ──park(vehicle, at)──▶ OCCUPIED ──vacate(at)──▶ FREE
//! ```
//!
//! The vehicle lives inside the spot while it is occupied, so "occupied"
//! and "holds a vehicle" cannot disagree.
//!
//! ## Guards
//!
//! - `park` rejects a vehicle whose type differs from the spot type.
//! - `park` rejects an occupied spot; the current occupant is never lost.
//! - `vacate` on a free spot logs a warning and returns `None`.
//!
//! The FREE → OCCUPIED check-and-set in `park` is the single point a
//! multi-gate design would have to make atomic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pklot_core::{ErrorKind, SpotLocation, Timestamp, Vehicle, VehicleId, VehicleType};

// ─── Spot State ──────────────────────────────────────────────────────

/// Occupancy state of a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotState {
    /// No vehicle parked.
    Free,
    /// A vehicle is parked.
    Occupied,
}

impl std::fmt::Display for SpotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Free => "FREE",
            Self::Occupied => "OCCUPIED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Rejected spot transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpotError {
    /// The vehicle's type does not match the spot's type.
    #[error("spot {location} accepts {spot_type} but vehicle is {vehicle_type}")]
    TypeMismatch {
        /// The spot that refused the vehicle.
        location: SpotLocation,
        /// Type the spot was built for.
        spot_type: VehicleType,
        /// Type of the rejected vehicle.
        vehicle_type: VehicleType,
    },

    /// The spot already holds a vehicle.
    #[error("spot {location} is already occupied by {occupant}")]
    AlreadyOccupied {
        /// The occupied spot.
        location: SpotLocation,
        /// The vehicle currently parked there.
        occupant: VehicleId,
    },
}

impl SpotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::InvalidArgument,
            Self::AlreadyOccupied { .. } => ErrorKind::InconsistentState,
        }
    }
}

// ─── Transition Record ───────────────────────────────────────────────

/// One entry in a spot's occupancy history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotTransitionRecord {
    /// State before the transition.
    pub from_state: SpotState,
    /// State after the transition.
    pub to_state: SpotState,
    /// The vehicle that arrived or left.
    pub vehicle_id: VehicleId,
    /// Its plate, for readable audit output.
    pub license_plate: String,
    /// When the transition happened.
    pub timestamp: Timestamp,
}

// ─── Parking Spot ────────────────────────────────────────────────────

/// A single parking spot with a fixed type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingSpot {
    location: SpotLocation,
    spot_type: VehicleType,
    vehicle: Option<Vehicle>,
    transitions: Vec<SpotTransitionRecord>,
}

impl ParkingSpot {
    /// Create a free spot.
    pub fn new(location: SpotLocation, spot_type: VehicleType) -> Self {
        Self {
            location,
            spot_type,
            vehicle: None,
            transitions: Vec::new(),
        }
    }

    pub fn location(&self) -> SpotLocation {
        self.location
    }

    pub fn spot_number(&self) -> u32 {
        self.location.spot_number
    }

    pub fn floor_number(&self) -> u32 {
        self.location.floor_number
    }

    pub fn spot_type(&self) -> VehicleType {
        self.spot_type
    }

    pub fn state(&self) -> SpotState {
        if self.vehicle.is_some() {
            SpotState::Occupied
        } else {
            SpotState::Free
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.vehicle.is_some()
    }

    /// Free and built for `vehicle_type`.
    pub fn is_available_for(&self, vehicle_type: VehicleType) -> bool {
        !self.is_occupied() && self.spot_type == vehicle_type
    }

    /// The parked vehicle, if any.
    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    /// Ordered occupancy history.
    ///
    /// Every transition is retained for the life of the spot; the log is
    /// an audit trail and is never trimmed.
    pub fn transitions(&self) -> &[SpotTransitionRecord] {
        &self.transitions
    }

    /// Park a vehicle (FREE → OCCUPIED).
    ///
    /// On error the vehicle is dropped and the spot is unchanged.
    pub fn park(&mut self, vehicle: Vehicle, at: Timestamp) -> Result<(), SpotError> {
        if vehicle.vehicle_type() != self.spot_type {
            return Err(SpotError::TypeMismatch {
                location: self.location,
                spot_type: self.spot_type,
                vehicle_type: vehicle.vehicle_type(),
            });
        }
        if let Some(occupant) = &self.vehicle {
            return Err(SpotError::AlreadyOccupied {
                location: self.location,
                occupant: occupant.id(),
            });
        }

        self.record(SpotState::Free, SpotState::Occupied, &vehicle, at);
        self.vehicle = Some(vehicle);
        Ok(())
    }

    /// Vacate the spot (OCCUPIED → FREE), handing back the vehicle.
    ///
    /// Vacating a free spot is a no-op: a warning is logged and `None`
    /// is returned.
    pub fn vacate(&mut self, at: Timestamp) -> Option<Vehicle> {
        match self.vehicle.take() {
            Some(vehicle) => {
                self.record(SpotState::Occupied, SpotState::Free, &vehicle, at);
                Some(vehicle)
            }
            None => {
                tracing::warn!(spot = %self.location, "vacate on a free spot; vehicle not parked");
                None
            }
        }
    }

    fn record(&mut self, from: SpotState, to: SpotState, vehicle: &Vehicle, at: Timestamp) {
        self.transitions.push(SpotTransitionRecord {
            from_state: from,
            to_state: to,
            vehicle_id: vehicle.id(),
            license_plate: vehicle.license_plate().to_string(),
            timestamp: at,
        });
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
