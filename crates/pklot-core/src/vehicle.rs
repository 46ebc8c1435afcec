//! # Vehicles and the Vehicle Factory
//!
//! A [`Vehicle`] is immutable once built. Its fee rule is selected by its
//! [`VehicleType`] through an exhaustive `match`, so there is no open class
//! hierarchy to extend by accident.
//!
//! [`VehicleFactory`] is the only constructor. It normalizes the plate
//! (trimmed, upper-case) and rejects blank plates and unknown type tags.

use serde::{Deserialize, Serialize};

use crate::domain::VehicleType;
use crate::error::PklotError;
use crate::identity::VehicleId;

/// Money in whole currency units.
pub type Fee = u64;

/// A physical vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    license_plate: String,
    vehicle_type: VehicleType,
}

impl Vehicle {
    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    /// Fee for a stay of `hours` whole hours.
    ///
    /// Saturates instead of overflowing for absurd durations.
    pub fn calculate_fee(&self, hours: u64) -> Fee {
        self.vehicle_type.hourly_rate().saturating_mul(hours)
    }
}

/// Builds vehicles from a plate and a type.
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleFactory;

impl VehicleFactory {
    /// Create a vehicle of the given type.
    ///
    /// # Errors
    ///
    /// [`PklotError::InvalidArgument`] if the plate is empty after trimming.
    pub fn create(license_plate: &str, vehicle_type: VehicleType) -> Result<Vehicle, PklotError> {
        let plate = license_plate.trim();
        if plate.is_empty() {
            return Err(PklotError::InvalidArgument(
                "license plate must not be empty".to_string(),
            ));
        }
        Ok(Vehicle {
            id: VehicleId::new(),
            license_plate: plate.to_ascii_uppercase(),
            vehicle_type,
        })
    }

    /// Create a vehicle from a textual type tag such as `"CAR"`.
    ///
    /// # Errors
    ///
    /// [`PklotError::UnsupportedVehicleType`] for any tag outside
    /// {BIKE, CAR}, and the errors of [`VehicleFactory::create`].
    pub fn create_from_tag(license_plate: &str, tag: &str) -> Result<Vehicle, PklotError> {
        let vehicle_type = tag.parse::<VehicleType>()?;
        Self::create(license_plate, vehicle_type)
    }
}
