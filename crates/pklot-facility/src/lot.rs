//! # Parking Lot
//!
//! Top-level aggregate: ordered floors plus the ticket registry. Every spot
//! lookup and every occupancy change routes through here.
//!
//! ## Allocation
//!
//! First fit across floors in registration order. Within a floor, first
//! free spot of the vehicle's type in creation order. There is no
//! balancing between floors and no nearest-spot heuristic.
//!
//! ## Vacate
//!
//! Only the vehicle that is actually parked in a spot can be vacated from
//! it; identity is the `VehicleId`, not the plate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use pklot_core::{PklotError, SpotLocation, Timestamp, Vehicle, VehicleId, VehicleType};
use pklot_state::ParkingSpot;

use crate::error::LotError;
use crate::floor::ParkingFloor;
use crate::registry::TicketRegistry;

/// Free/total counts for one vehicle type across the lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub vehicle_type: VehicleType,
    pub capacity: usize,
    pub free: usize,
}

impl OccupancySummary {
    pub fn occupied(&self) -> usize {
        self.capacity - self.free
    }
}

/// The parking facility.
#[derive(Debug, Clone)]
pub struct ParkingLot {
    floors: Vec<ParkingFloor>,
    tickets: TicketRegistry,
}

impl ParkingLot {
    /// Assemble a lot from floors, kept in the given order.
    ///
    /// # Errors
    ///
    /// [`LotError::Config`] if two floors share a number, since spot
    /// locations would then be ambiguous.
    pub fn new(floors: Vec<ParkingFloor>) -> Result<Self, LotError> {
        let mut seen = BTreeSet::new();
        for floor in &floors {
            if !seen.insert(floor.floor_number()) {
                return Err(LotError::Config(format!(
                    "duplicate floor number {}",
                    floor.floor_number()
                )));
            }
        }
        Ok(Self {
            floors,
            tickets: TicketRegistry::new(),
        })
    }

    pub fn floors(&self) -> &[ParkingFloor] {
        &self.floors
    }

    pub fn tickets(&self) -> &TicketRegistry {
        &self.tickets
    }

    pub fn tickets_mut(&mut self) -> &mut TicketRegistry {
        &mut self.tickets
    }

    /// Exact lookup by floor and spot number.
    pub fn spot(&self, location: SpotLocation) -> Option<&ParkingSpot> {
        self.floors
            .iter()
            .find(|f| f.floor_number() == location.floor_number)?
            .spot(location.spot_number)
    }

    fn spot_mut(&mut self, location: SpotLocation) -> Option<&mut ParkingSpot> {
        self.floors
            .iter_mut()
            .find(|f| f.floor_number() == location.floor_number)?
            .spot_mut(location.spot_number)
    }

    /// First free spot for `vehicle_type`, scanning floors in order.
    pub fn find_available_spot(&self, vehicle_type: VehicleType) -> Option<&ParkingSpot> {
        self.floors.iter().find_map(|f| f.find_spot(vehicle_type))
    }

    /// Park `vehicle` in the first free matching spot, recording the
    /// transition at `at`.
    ///
    /// Returns `Ok(None)` when no floor has room for the vehicle's type; no
    /// spot is touched in that case and the vehicle is dropped.
    pub fn park(
        &mut self,
        vehicle: Vehicle,
        at: Timestamp,
    ) -> Result<Option<SpotLocation>, LotError> {
        let vehicle_type = vehicle.vehicle_type();
        let Some(location) = self
            .find_available_spot(vehicle_type)
            .map(ParkingSpot::location)
        else {
            tracing::info!(
                %vehicle_type,
                plate = vehicle.license_plate(),
                "all spots are occupied"
            );
            return Ok(None);
        };

        let spot = self
            .spot_mut(location)
            .ok_or(LotError::UnknownSpot(location))?;
        spot.park(vehicle, at)?;
        tracing::info!(spot = %location, "vehicle parked successfully");
        Ok(Some(location))
    }

    /// Like [`ParkingLot::park`], but a full lot is an error.
    ///
    /// # Errors
    ///
    /// [`PklotError::CapacityExhausted`] (wrapped in [`LotError::Core`]) when
    /// no floor has a free spot for the vehicle's type.
    pub fn park_or_err(
        &mut self,
        vehicle: Vehicle,
        at: Timestamp,
    ) -> Result<SpotLocation, LotError> {
        let vehicle_type = vehicle.vehicle_type();
        self.park(vehicle, at)?
            .ok_or_else(|| PklotError::CapacityExhausted(vehicle_type).into())
    }

    /// Vacate `location`, which must currently hold the vehicle `vehicle_id`.
    ///
    /// # Errors
    ///
    /// - [`LotError::UnknownSpot`] if no such spot exists.
    /// - [`LotError::InvalidVacate`] if the spot is free or holds another
    ///   vehicle. Nothing is mutated.
    pub fn vacate(
        &mut self,
        location: SpotLocation,
        vehicle_id: VehicleId,
        at: Timestamp,
    ) -> Result<Vehicle, LotError> {
        let spot = self
            .spot_mut(location)
            .ok_or(LotError::UnknownSpot(location))?;

        let reason = match spot.vehicle() {
            None => Some("spot is already vacant"),
            Some(parked) if parked.id() != vehicle_id => Some("vehicle does not match"),
            Some(_) => None,
        };
        if let Some(reason) = reason {
            tracing::warn!(spot = %location, %vehicle_id, reason, "invalid vacate");
            return Err(LotError::InvalidVacate {
                location,
                reason: reason.to_string(),
            });
        }

        let vehicle = spot.vacate(at).ok_or_else(|| LotError::InvalidVacate {
            location,
            reason: "spot is already vacant".to_string(),
        })?;
        tracing::info!(spot = %location, plate = vehicle.license_plate(), "vehicle vacated");
        Ok(vehicle)
    }

    /// First spot with this number, scanning floors in order.
    ///
    /// Spot numbers restart at 1 on every floor, so a number is unique only
    /// within a single-floor lot. With several floors this returns the
    /// earliest floor's spot, which need not be the spot [`ParkingLot::park`]
    /// returned for that number; use [`ParkingLot::spot`] for an exact
    /// lookup.
    pub fn find_spot_by_number(&self, spot_number: u32) -> Option<&ParkingSpot> {
        self.floors
            .iter()
            .flat_map(|f| f.spots().iter())
            .find(|s| s.spot_number() == spot_number)
    }

    /// Capacity and free counts per vehicle type.
    pub fn occupancy(&self) -> Vec<OccupancySummary> {
        VehicleType::all()
            .iter()
            .map(|&vehicle_type| OccupancySummary {
                vehicle_type,
                capacity: self.floors.iter().map(|f| f.capacity(vehicle_type)).sum(),
                free: self.floors.iter().map(|f| f.free_count(vehicle_type)).sum(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pklot_core::{ErrorKind, VehicleFactory};
    use pklot_state::SpotState;

    fn car(plate: &str) -> Vehicle {
        VehicleFactory::create(plate, VehicleType::Car).unwrap()
    }

    fn bike(plate: &str) -> Vehicle {
        VehicleFactory::create(plate, VehicleType::Bike).unwrap()
    }

    fn t0() -> Timestamp {
        Timestamp::parse("2025-05-17T10:30:00Z").unwrap()
    }

    fn demo_lot() -> ParkingLot {
        ParkingLot::new(vec![ParkingFloor::new(1, 2, 2).unwrap()]).unwrap()
    }

    fn states(lot: &ParkingLot) -> Vec<SpotState> {
        lot.floors()
            .iter()
            .flat_map(|f| f.spots().iter().map(ParkingSpot::state))
            .collect()
    }

    #[test]
    fn test_duplicate_floor_numbers_rejected() {
        let err = ParkingLot::new(vec![
            ParkingFloor::new(1, 1, 1).unwrap(),
            ParkingFloor::new(1, 1, 1).unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(err, LotError::Config(_)));
    }

    #[test]
    fn test_park_car_lands_after_bikes() {
        let mut lot = demo_lot();
        let v = car("DL9CBB6391");
        let id = v.id();
        let loc = lot.park(v, t0()).unwrap().unwrap();
        assert_eq!(loc, SpotLocation::new(1, 3));
        let spot = lot.spot(loc).unwrap();
        assert!(spot.is_occupied());
        assert_eq!(spot.vehicle().unwrap().id(), id);
    }

    #[test]
    fn test_park_first_fit_across_floors() {
        let mut lot = ParkingLot::new(vec![
            ParkingFloor::new(1, 0, 1).unwrap(),
            ParkingFloor::new(2, 0, 1).unwrap(),
        ])
        .unwrap();
        assert_eq!(lot.park(car("A"), t0()).unwrap(), Some(SpotLocation::new(1, 1)));
        assert_eq!(lot.park(car("B"), t0()).unwrap(), Some(SpotLocation::new(2, 1)));
        assert_eq!(lot.park(car("C"), t0()).unwrap(), None);
    }

    #[test]
    fn test_park_full_mutates_nothing() {
        let mut lot = demo_lot();
        lot.park(car("A"), t0()).unwrap();
        lot.park(car("B"), t0()).unwrap();
        let before = states(&lot);
        assert_eq!(lot.park(car("C"), t0()).unwrap(), None);
        assert_eq!(states(&lot), before);
    }

    #[test]
    fn test_park_type_with_no_spots() {
        let mut lot = ParkingLot::new(vec![ParkingFloor::new(1, 0, 2).unwrap()]).unwrap();
        assert_eq!(lot.park(bike("KA01"), t0()).unwrap(), None);
        assert!(states(&lot).iter().all(|s| *s == SpotState::Free));
    }

    #[test]
    fn test_vacate_requires_matching_vehicle() {
        let mut lot = demo_lot();
        let v = car("DL1");
        let id = v.id();
        let loc = lot.park(v, t0()).unwrap().unwrap();

        let err = lot.vacate(loc, car("DL1").id(), t0()).unwrap_err();
        assert!(matches!(err, LotError::InvalidVacate { .. }));
        assert_eq!(err.kind(), ErrorKind::InconsistentState);
        assert!(lot.spot(loc).unwrap().is_occupied());

        let out = lot.vacate(loc, id, t0()).unwrap();
        assert_eq!(out.id(), id);
        let spot = lot.spot(loc).unwrap();
        assert!(!spot.is_occupied());
        assert!(spot.vehicle().is_none());
    }

    #[test]
    fn test_vacate_free_spot_rejected() {
        let mut lot = demo_lot();
        let err = lot.vacate(SpotLocation::new(1, 3), VehicleId::new(), t0()).unwrap_err();
        assert!(matches!(err, LotError::InvalidVacate { .. }));
    }

    #[test]
    fn test_vacate_unknown_spot() {
        let mut lot = demo_lot();
        let err = lot.vacate(SpotLocation::new(9, 1), VehicleId::new(), t0()).unwrap_err();
        assert!(matches!(err, LotError::UnknownSpot(_)));
    }

    #[test]
    fn test_find_spot_by_number() {
        let mut lot = demo_lot();
        let v = car("DL1");
        let id = v.id();
        let loc = lot.park(v, t0()).unwrap().unwrap();

        let spot = lot.find_spot_by_number(loc.spot_number).unwrap();
        assert_eq!(spot.location(), loc);
        assert_eq!(spot.vehicle().unwrap().id(), id);
        assert!(lot.find_spot_by_number(5).is_none());
        assert!(lot.find_spot_by_number(0).is_none());
    }

    #[test]
    fn test_find_spot_by_number_prefers_first_floor() {
        let lot = ParkingLot::new(vec![
            ParkingFloor::new(1, 1, 0).unwrap(),
            ParkingFloor::new(2, 1, 0).unwrap(),
        ])
        .unwrap();
        assert_eq!(lot.find_spot_by_number(1).unwrap().floor_number(), 1);
    }

    #[test]
    fn test_find_spot_by_number_multi_floor_returns_earliest_floor() {
        let mut lot = ParkingLot::new(vec![
            ParkingFloor::new(1, 0, 1).unwrap(),
            ParkingFloor::new(2, 0, 1).unwrap(),
        ])
        .unwrap();
        lot.park(car("A"), t0()).unwrap();
        let second = lot.park(car("B"), t0()).unwrap().unwrap();
        assert_eq!(second, SpotLocation::new(2, 1));

        let by_number = lot.find_spot_by_number(second.spot_number).unwrap();
        assert_eq!(by_number.location(), SpotLocation::new(1, 1));
        assert_eq!(lot.spot(second).unwrap().location(), second);
    }

    #[test]
    fn test_park_or_err_reports_capacity() {
        let mut lot = ParkingLot::new(vec![ParkingFloor::new(1, 1, 0).unwrap()]).unwrap();
        assert_eq!(
            lot.park_or_err(bike("KA01"), t0()).unwrap(),
            SpotLocation::new(1, 1)
        );
        let err = lot.park_or_err(bike("KA02"), t0()).unwrap_err();
        assert!(matches!(
            err,
            LotError::Core(PklotError::CapacityExhausted(VehicleType::Bike))
        ));
        assert_eq!(err.kind(), ErrorKind::CapacityExhausted);
    }

    #[test]
    fn test_transitions_stamped_with_given_instant() {
        let mut lot = demo_lot();
        let v = car("DL1");
        let id = v.id();
        let loc = lot.park(v, t0()).unwrap().unwrap();
        let later = Timestamp::parse("2025-05-17T15:30:00Z").unwrap();
        lot.vacate(loc, id, later).unwrap();

        let log = lot.spot(loc).unwrap().transitions();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].timestamp, t0());
        assert_eq!(log[1].timestamp, later);
        assert_eq!(log[1].vehicle_id, id);
    }

    #[test]
    fn test_occupancy() {
        let mut lot = demo_lot();
        lot.park(car("A"), t0()).unwrap();
        let summary = lot.occupancy();
        let cars = summary
            .iter()
            .find(|s| s.vehicle_type == VehicleType::Car)
            .unwrap();
        assert_eq!(cars.capacity, 2);
        assert_eq!(cars.free, 1);
        assert_eq!(cars.occupied(), 1);
    }
}
