//! # Parking Floor
//!
//! A floor owns a fixed sequence of spots created once:
//!
//! ```text
//! #1 .. #b        BIKE
//! #b+1 .. #b+c    CAR
//! ```
//!
//! Searches scan that sequence in creation order and return the first free
//! spot of the requested type.

use serde::{Deserialize, Serialize};

use pklot_core::{PklotError, SpotLocation, VehicleType};
use pklot_state::ParkingSpot;

use crate::error::LotError;

/// One floor of the lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingFloor {
    floor_number: u32,
    spots: Vec<ParkingSpot>,
}

impl ParkingFloor {
    /// Build a floor with `bike_spots` bike spots followed by `car_spots`
    /// car spots, numbered from 1.
    ///
    /// # Errors
    ///
    /// [`PklotError::InvalidArgument`] if the total spot count does not fit
    /// in a `u32` spot number.
    pub fn new(floor_number: u32, bike_spots: u32, car_spots: u32) -> Result<Self, LotError> {
        let total = bike_spots.checked_add(car_spots).ok_or_else(|| {
            PklotError::InvalidArgument(format!(
                "floor {floor_number}: {bike_spots} bike + {car_spots} car spots overflows spot numbering"
            ))
        })?;
        let spots = (1..=total)
            .map(|n| {
                let spot_type = if n <= bike_spots {
                    VehicleType::Bike
                } else {
                    VehicleType::Car
                };
                ParkingSpot::new(SpotLocation::new(floor_number, n), spot_type)
            })
            .collect();
        Ok(Self {
            floor_number,
            spots,
        })
    }

    pub fn floor_number(&self) -> u32 {
        self.floor_number
    }

    /// Spots in creation order.
    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    /// The spot with this number, if it exists on this floor.
    pub fn spot(&self, spot_number: u32) -> Option<&ParkingSpot> {
        self.spots.iter().find(|s| s.spot_number() == spot_number)
    }

    pub(crate) fn spot_mut(&mut self, spot_number: u32) -> Option<&mut ParkingSpot> {
        self.spots.iter_mut().find(|s| s.spot_number() == spot_number)
    }

    /// First free spot of `vehicle_type`, in creation order.
    ///
    /// `None` is an ordinary outcome meaning the floor is full for that type.
    pub fn find_spot(&self, vehicle_type: VehicleType) -> Option<&ParkingSpot> {
        let found = self.spots.iter().find(|s| s.is_available_for(vehicle_type));
        if found.is_none() {
            tracing::debug!(
                floor = self.floor_number,
                %vehicle_type,
                "all spots of this type are occupied on floor"
            );
        }
        found
    }

    /// Number of spots built for `vehicle_type`.
    pub fn capacity(&self, vehicle_type: VehicleType) -> usize {
        self.spots
            .iter()
            .filter(|s| s.spot_type() == vehicle_type)
            .count()
    }

    /// Number of free spots built for `vehicle_type`.
    pub fn free_count(&self, vehicle_type: VehicleType) -> usize {
        self.spots
            .iter()
            .filter(|s| s.is_available_for(vehicle_type))
            .count()
    }
}
