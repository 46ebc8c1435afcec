//! # Ticket Registry
//!
//! In-memory `TicketId → Ticket` map owned by the lot. The exit gate looks
//! tickets up here and redeems them here, so the registry is the single
//! place that knows whether a ticket is still good.

use std::collections::HashMap;

use pklot_core::{Fee, TicketId, Timestamp};
use pklot_state::Ticket;

use crate::error::LotError;

/// Every ticket the lot has issued.
#[derive(Debug, Clone, Default)]
pub struct TicketRegistry {
    tickets: HashMap<TicketId, Ticket>,
}

impl TicketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly issued ticket and return the stored copy.
    pub fn register(&mut self, ticket: Ticket) -> &Ticket {
        self.tickets.entry(ticket.id()).or_insert(ticket)
    }

    pub fn get(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.get(id)
    }

    /// Redeem an ACTIVE ticket (ACTIVE → REDEEMED).
    pub fn redeem(&mut self, id: &TicketId, fee: Fee, at: Timestamp) -> Result<&Ticket, LotError> {
        let ticket = self
            .tickets
            .get_mut(id)
            .ok_or(LotError::UnknownTicket(*id))?;
        ticket.redeem(fee, at)?;
        Ok(ticket)
    }

    /// Active tickets, oldest first.
    pub fn active(&self) -> Vec<&Ticket> {
        let mut active: Vec<&Ticket> = self.tickets.values().filter(|t| t.is_active()).collect();
        active.sort_by_key(|t| (t.issued_at(), t.spot()));
        active
    }

    /// The oldest active ticket for a plate, if one exists.
    ///
    /// A plate can hold several active tickets; ties on issuance time are
    /// broken by spot location so the choice never depends on map order.
    pub fn find_active_by_plate(&self, license_plate: &str) -> Option<&Ticket> {
        let plate = license_plate.trim();
        self.tickets
            .values()
            .filter(|t| t.is_active() && t.license_plate().eq_ignore_ascii_case(plate))
            .min_by_key(|t| (t.issued_at(), t.spot()))
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
