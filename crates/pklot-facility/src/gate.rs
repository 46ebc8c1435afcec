//! # Entrance and Exit Gates
//!
//! The two transactions of the lot.
//!
//! ## Entrance
//!
//! ```text
//! plate + type ──▶ VehicleFactory ──▶ ParkingLot::park ──▶ Ticket::issue ──▶ registry
//!                                          │
//!                                          └── Ok(None): lot full for the type
//! ```
//!
//! ## Exit
//!
//! ```text
//! ticket id ──▶ lookup ──▶ not redeemed ──▶ spot holds vehicle ──▶ hours ──▶ fee
//!          ──▶ payment ──▶ vacate ──▶ redeem
//! ```
//!
//! Every check that can fail runs before the first mutation. A rejected
//! exit (unknown ticket, double redemption, spot mismatch, declined
//! payment) leaves the lot and the registry exactly as they were.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pklot_core::{
    Clock, Fee, PaymentMethod, SpotLocation, TicketId, Vehicle, VehicleFactory, VehicleType,
};
use pklot_payment::{PaymentError, PaymentReceipt, PaymentService};
use pklot_state::{Ticket, TicketError};

use crate::error::LotError;
use crate::lot::ParkingLot;

/// Admits vehicles and issues tickets.
#[derive(Debug, Clone)]
pub struct EntranceGate {
    clock: Arc<dyn Clock>,
}

impl EntranceGate {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Admit a vehicle.
    ///
    /// Returns the issued ticket, or `Ok(None)` when the lot has no free
    /// spot for `vehicle_type`. A blank plate is an error.
    pub fn process_entrance(
        &self,
        lot: &mut ParkingLot,
        license_plate: &str,
        vehicle_type: VehicleType,
    ) -> Result<Option<Ticket>, LotError> {
        let vehicle = VehicleFactory::create(license_plate, vehicle_type)?;
        self.admit(lot, vehicle)
    }

    /// Admit a vehicle whose type arrives as a text tag.
    ///
    /// Unknown tags are rejected before the lot is consulted.
    pub fn process_entrance_tag(
        &self,
        lot: &mut ParkingLot,
        license_plate: &str,
        vehicle_type: &str,
    ) -> Result<Option<Ticket>, LotError> {
        let vehicle = VehicleFactory::create_from_tag(license_plate, vehicle_type)?;
        self.admit(lot, vehicle)
    }

    fn admit(&self, lot: &mut ParkingLot, vehicle: Vehicle) -> Result<Option<Ticket>, LotError> {
        let plate = vehicle.license_plate().to_string();
        let now = self.clock.now();
        let Some(location) = lot.park(vehicle, now)? else {
            tracing::info!(%plate, "no spot available, entrance refused");
            return Ok(None);
        };

        let ticket = {
            let parked = lot
                .spot(location)
                .and_then(|s| s.vehicle())
                .ok_or(LotError::UnknownSpot(location))?;
            Ticket::issue(location, parked, now)
        };
        lot.tickets_mut().register(ticket.clone());

        tracing::info!(
            %plate,
            spot = %location,
            ticket = %ticket.id(),
            "Successfully parked at spot"
        );
        Ok(Some(ticket))
    }
}

/// Outcome of a successful exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitReceipt {
    pub ticket_id: TicketId,
    pub spot: SpotLocation,
    pub license_plate: String,
    pub hours: u64,
    pub fee: Fee,
    pub payment: PaymentReceipt,
}

/// Charges for the stay, frees the spot and closes the ticket.
#[derive(Debug)]
pub struct ExitGate {
    clock: Arc<dyn Clock>,
    payments: PaymentService,
}

impl ExitGate {
    pub fn new(clock: Arc<dyn Clock>, payments: PaymentService) -> Self {
        Self { clock, payments }
    }

    pub fn payments(&self) -> &PaymentService {
        &self.payments
    }

    /// Process an exit for `ticket_id`, paying with `method`.
    ///
    /// # Errors
    ///
    /// - [`LotError::UnknownTicket`] if the registry has no such ticket.
    /// - [`LotError::Ticket`] if the ticket was already redeemed.
    /// - [`LotError::InvalidVacate`] if the ticketed spot is missing, free,
    ///   or holds a different vehicle.
    /// - [`LotError::Payment`] if the strategy declines.
    ///
    /// None of these mutate anything.
    pub fn process_exit(
        &self,
        lot: &mut ParkingLot,
        ticket_id: &TicketId,
        method: PaymentMethod,
    ) -> Result<ExitReceipt, LotError> {
        let now = self.clock.now();

        let ticket = lot
            .tickets()
            .get(ticket_id)
            .ok_or(LotError::UnknownTicket(*ticket_id))?;
        if let Some(redeemed_at) = ticket.redeemed_at() {
            return Err(TicketError::AlreadyRedeemed {
                ticket_id: *ticket_id,
                redeemed_at,
            }
            .into());
        }

        let location = ticket.spot();
        let vehicle_id = ticket.vehicle_id();
        let license_plate = ticket.license_plate().to_string();

        let spot = lot.spot(location).ok_or_else(|| LotError::InvalidVacate {
            location,
            reason: "ticketed spot does not exist".to_string(),
        })?;
        let vehicle = match spot.vehicle() {
            Some(v) if v.id() == vehicle_id => v,
            Some(_) => {
                return Err(LotError::InvalidVacate {
                    location,
                    reason: "spot holds a different vehicle".to_string(),
                })
            }
            None => {
                return Err(LotError::InvalidVacate {
                    location,
                    reason: "spot is already vacant".to_string(),
                })
            }
        };

        let hours = ticket.calculate_hours(now);
        let fee = vehicle.calculate_fee(hours);
        tracing::info!(%license_plate, spot = %location, hours, fee, "Total fee");

        let payment = self.payments.process_payment(fee, method).map_err(|e| {
            tracing::warn!(%license_plate, error = %e, "payment failed, exit aborted");
            e
        })?;

        lot.vacate(location, vehicle_id, now)?;
        lot.tickets_mut().redeem(ticket_id, fee, now)?;

        tracing::info!(%license_plate, spot = %location, "vehicle exited");
        Ok(ExitReceipt {
            ticket_id: *ticket_id,
            spot: location,
            license_plate,
            hours,
            fee,
            payment,
        })
    }

    /// Process an exit with the payment method given as a text tag.
    ///
    /// Unknown tags are rejected before the ticket is looked up.
    pub fn process_exit_tag(
        &self,
        lot: &mut ParkingLot,
        ticket_id: &TicketId,
        method: &str,
    ) -> Result<ExitReceipt, LotError> {
        let method = method
            .parse::<PaymentMethod>()
            .map_err(|_| PaymentError::UnsupportedMethod(method.to_string()))?;
        self.process_exit(lot, ticket_id, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pklot_core::{ErrorKind, ManualClock, Timestamp};
    use pklot_payment::PaymentStrategy;
    use pklot_state::TicketState;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::floor::ParkingFloor;

    #[derive(Debug)]
    struct DecliningUpi;

    impl PaymentStrategy for DecliningUpi {
        fn method(&self) -> PaymentMethod {
            PaymentMethod::Upi
        }

        fn process_payment(&self, amount: Fee) -> Result<PaymentReceipt, PaymentError> {
            Err(PaymentError::Declined {
                method: PaymentMethod::Upi,
                amount,
                reason: "bank unreachable".into(),
            })
        }
    }

    #[derive(Debug)]
    struct CountingCash(Arc<AtomicUsize>);

    impl PaymentStrategy for CountingCash {
        fn method(&self) -> PaymentMethod {
            PaymentMethod::Cash
        }

        fn process_payment(&self, amount: Fee) -> Result<PaymentReceipt, PaymentError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(PaymentReceipt {
                method: PaymentMethod::Cash,
                amount,
            })
        }
    }

    struct Fixture {
        clock: Arc<ManualClock>,
        lot: ParkingLot,
        entrance: EntranceGate,
        exit: ExitGate,
    }

    fn fixture_with(payments: PaymentService) -> Fixture {
        let clock = Arc::new(ManualClock::new(
            Timestamp::parse("2025-05-17T10:30:00Z").unwrap(),
        ));
        Fixture {
            lot: ParkingLot::new(vec![ParkingFloor::new(1, 2, 2).unwrap()]).unwrap(),
            entrance: EntranceGate::new(clock.clone()),
            exit: ExitGate::new(clock.clone(), payments),
            clock,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(PaymentService::new())
    }

    #[test]
    fn test_entrance_issues_registered_ticket() {
        let mut f = fixture();
        let ticket = f
            .entrance
            .process_entrance(&mut f.lot, "DL9CBB6391", VehicleType::Car)
            .unwrap()
            .unwrap();
        assert_eq!(ticket.spot(), SpotLocation::new(1, 3));
        assert_eq!(ticket.license_plate(), "DL9CBB6391");
        assert_eq!(ticket.issued_at(), f.clock.now());
        assert_eq!(f.lot.tickets().get(&ticket.id()), Some(&ticket));
    }

    #[test]
    fn test_entrance_blank_plate_rejected() {
        let mut f = fixture();
        let err = f
            .entrance
            .process_entrance(&mut f.lot, "  ", VehicleType::Car)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(f.lot.tickets().is_empty());
    }

    #[test]
    fn test_entrance_unknown_tag_rejected() {
        let mut f = fixture();
        let err = f
            .entrance
            .process_entrance_tag(&mut f.lot, "DL1", "TRUCK")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(f.lot.occupancy()[1].free, 2);
    }

    #[test]
    fn test_entrance_full_returns_none() {
        let mut f = fixture();
        for plate in ["A", "B"] {
            assert!(f
                .entrance
                .process_entrance(&mut f.lot, plate, VehicleType::Bike)
                .unwrap()
                .is_some());
        }
        let none = f
            .entrance
            .process_entrance(&mut f.lot, "C", VehicleType::Bike)
            .unwrap();
        assert!(none.is_none());
        assert_eq!(f.lot.tickets().len(), 2);
    }

    #[test]
    fn test_exit_charges_and_frees() {
        let mut f = fixture();
        let ticket = f
            .entrance
            .process_entrance(&mut f.lot, "DL9CBB6391", VehicleType::Car)
            .unwrap()
            .unwrap();
        f.clock.advance_hours(5);

        let receipt = f
            .exit
            .process_exit(&mut f.lot, &ticket.id(), PaymentMethod::Upi)
            .unwrap();
        assert_eq!(receipt.hours, 5);
        assert_eq!(receipt.fee, 100);
        assert_eq!(
            receipt.payment,
            PaymentReceipt {
                method: PaymentMethod::Upi,
                amount: 100
            }
        );
        let spot = f.lot.spot(ticket.spot()).unwrap();
        assert!(!spot.is_occupied());
        let log = spot.transitions();
        assert_eq!(log[0].timestamp, ticket.issued_at());
        assert_eq!(log[1].timestamp, f.clock.now());

        let stored = f.lot.tickets().get(&ticket.id()).unwrap();
        assert_eq!(stored.state(), TicketState::Redeemed);
        assert_eq!(stored.fee_charged(), Some(100));
    }

    #[test]
    fn test_exit_twice_rejected() {
        let mut f = fixture();
        let ticket = f
            .entrance
            .process_entrance(&mut f.lot, "KA01", VehicleType::Bike)
            .unwrap()
            .unwrap();
        f.exit
            .process_exit(&mut f.lot, &ticket.id(), PaymentMethod::Cash)
            .unwrap();

        let err = f
            .exit
            .process_exit(&mut f.lot, &ticket.id(), PaymentMethod::Cash)
            .unwrap_err();
        assert!(matches!(err, LotError::Ticket(_)));
        assert_eq!(err.kind(), ErrorKind::InconsistentState);
    }

    fn counting_fixture() -> (Fixture, Arc<AtomicUsize>) {
        let charges = Arc::new(AtomicUsize::new(0));
        let payments =
            PaymentService::new().with_strategy(Box::new(CountingCash(charges.clone())));
        (fixture_with(payments), charges)
    }

    #[test]
    fn test_exit_after_spot_vacated_is_rejected() {
        let (mut f, charges) = counting_fixture();
        let ticket = f
            .entrance
            .process_entrance(&mut f.lot, "DL1", VehicleType::Car)
            .unwrap()
            .unwrap();
        f.lot
            .vacate(ticket.spot(), ticket.vehicle_id(), f.clock.now())
            .unwrap();
        f.clock.advance_hours(2);

        let err = f
            .exit
            .process_exit(&mut f.lot, &ticket.id(), PaymentMethod::Cash)
            .unwrap_err();
        match &err {
            LotError::InvalidVacate { location, reason } => {
                assert_eq!(*location, ticket.spot());
                assert_eq!(reason, "spot is already vacant");
            }
            other => panic!("Expected InvalidVacate, got: {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::InconsistentState);
        assert!(f.lot.tickets().get(&ticket.id()).unwrap().is_active());
        assert_eq!(charges.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_exit_with_other_vehicle_in_spot_is_rejected() {
        let (mut f, charges) = counting_fixture();
        let ticket = f
            .entrance
            .process_entrance(&mut f.lot, "DL1", VehicleType::Car)
            .unwrap()
            .unwrap();
        f.lot
            .vacate(ticket.spot(), ticket.vehicle_id(), f.clock.now())
            .unwrap();
        let intruder = VehicleFactory::create("DL2", VehicleType::Car).unwrap();
        let intruder_id = intruder.id();
        let reparked = f.lot.park(intruder, f.clock.now()).unwrap().unwrap();
        assert_eq!(reparked, ticket.spot());

        let err = f
            .exit
            .process_exit(&mut f.lot, &ticket.id(), PaymentMethod::Cash)
            .unwrap_err();
        match &err {
            LotError::InvalidVacate { reason, .. } => {
                assert_eq!(reason, "spot holds a different vehicle");
            }
            other => panic!("Expected InvalidVacate, got: {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::InconsistentState);
        assert!(f.lot.tickets().get(&ticket.id()).unwrap().is_active());
        let spot = f.lot.spot(ticket.spot()).unwrap();
        assert_eq!(spot.vehicle().unwrap().id(), intruder_id);
        assert_eq!(charges.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_exit_unknown_ticket() {
        let mut f = fixture();
        let err = f
            .exit
            .process_exit(&mut f.lot, &TicketId::new(), PaymentMethod::Cash)
            .unwrap_err();
        assert!(matches!(err, LotError::UnknownTicket(_)));
    }

    #[test]
    fn test_exit_declined_payment_mutates_nothing() {
        let mut f = fixture_with(PaymentService::new().with_strategy(Box::new(DecliningUpi)));
        let ticket = f
            .entrance
            .process_entrance(&mut f.lot, "DL1", VehicleType::Car)
            .unwrap()
            .unwrap();
        f.clock.advance_hours(2);

        let err = f
            .exit
            .process_exit(&mut f.lot, &ticket.id(), PaymentMethod::Upi)
            .unwrap_err();
        assert!(matches!(err, LotError::Payment(_)));
        assert!(f.lot.spot(ticket.spot()).unwrap().is_occupied());
        assert!(f.lot.tickets().get(&ticket.id()).unwrap().is_active());

        let receipt = f
            .exit
            .process_exit(&mut f.lot, &ticket.id(), PaymentMethod::Cash)
            .unwrap();
        assert_eq!(receipt.fee, 40);
    }

    #[test]
    fn test_exit_unknown_method_tag() {
        let mut f = fixture();
        let ticket = f
            .entrance
            .process_entrance(&mut f.lot, "DL1", VehicleType::Car)
            .unwrap()
            .unwrap();
        let err = f
            .exit
            .process_exit_tag(&mut f.lot, &ticket.id(), "BITCOIN")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(f.lot.tickets().get(&ticket.id()).unwrap().is_active());

        let receipt = f
            .exit
            .process_exit_tag(&mut f.lot, &ticket.id(), "credit-card")
            .unwrap();
        assert_eq!(receipt.payment.method, PaymentMethod::CreditCard);
    }

    #[test]
    fn test_exit_receipt_json() {
        let mut f = fixture();
        let ticket = f
            .entrance
            .process_entrance(&mut f.lot, "DL1", VehicleType::Car)
            .unwrap()
            .unwrap();
        f.clock.advance_hours(1);
        let receipt = f
            .exit
            .process_exit(&mut f.lot, &ticket.id(), PaymentMethod::Cash)
            .unwrap();
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["fee"], 20);
        assert_eq!(json["payment"]["method"], "CASH");
        assert_eq!(json["license_plate"], "DL1");
    }
}
