//! # Identifier Newtypes
//!
//! Type-level distinction between identifier namespaces: a `TicketId`
//! cannot be passed where a `VehicleId` is expected.
//!
//! Vehicle identity is the `VehicleId`, not the license plate. Two vehicles
//! with the same plate are still different vehicles, and the lot's vacate
//! check compares ids.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a vehicle, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub Uuid);

/// Unique identifier of a parking ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(pub Uuid);

impl VehicleId {
    /// Generate a new random vehicle identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VehicleId {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketId {
    /// Generate a new random ticket identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vehicle:{}", self.0)
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ticket:{}", self.0)
    }
}

/// Where a spot lives: its floor and its number on that floor.
///
/// Spot numbers restart at 1 on every floor, so the pair is what uniquely
/// identifies a spot within a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpotLocation {
    /// Floor number as configured.
    pub floor_number: u32,
    /// Spot number on that floor (1-based).
    pub spot_number: u32,
}

impl SpotLocation {
    pub fn new(floor_number: u32, spot_number: u32) -> Self {
        Self {
            floor_number,
            spot_number,
        }
    }
}

impl std::fmt::Display for SpotLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "F{}#{}", self.floor_number, self.spot_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(VehicleId::new(), VehicleId::new());
        assert_ne!(TicketId::new(), TicketId::new());
    }

    #[test]
    fn test_display_prefixes() {
        let id = TicketId::new();
        assert!(id.to_string().starts_with("ticket:"));
        let id = VehicleId::new();
        assert!(id.to_string().starts_with("vehicle:"));
    }

    #[test]
    fn test_spot_location_display_and_order() {
        let a = SpotLocation::new(1, 3);
        let b = SpotLocation::new(2, 1);
        assert_eq!(a.to_string(), "F1#3");
        assert!(a < b);
    }
}
