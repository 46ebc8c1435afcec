//! # Payment Service
//!
//! Selects a [`PaymentStrategy`] by method and runs it. Dispatch is an
//! exhaustive `match` on [`PaymentMethod`], so a new method cannot be added
//! without deciding which strategy serves it. Text tags go through
//! [`PaymentService::process_payment_tag`], which rejects anything outside
//! the closed set before any strategy runs.

use pklot_core::{Fee, PaymentMethod};

use crate::strategies::{Cash, CreditCard, Upi};
use crate::traits::{PaymentError, PaymentReceipt, PaymentStrategy};

/// Dispatches payments to one strategy per method.
#[derive(Debug)]
pub struct PaymentService {
    cash: Box<dyn PaymentStrategy>,
    credit_card: Box<dyn PaymentStrategy>,
    upi: Box<dyn PaymentStrategy>,
}

impl Default for PaymentService {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentService {
    /// Service backed by the built-in strategies.
    pub fn new() -> Self {
        Self {
            cash: Box::new(Cash),
            credit_card: Box::new(CreditCard),
            upi: Box::new(Upi),
        }
    }

    /// Replace the strategy serving `strategy.method()`.
    pub fn with_strategy(mut self, strategy: Box<dyn PaymentStrategy>) -> Self {
        match strategy.method() {
            PaymentMethod::Cash => self.cash = strategy,
            PaymentMethod::CreditCard => self.credit_card = strategy,
            PaymentMethod::Upi => self.upi = strategy,
        }
        self
    }

    /// The strategy currently serving `method`.
    pub fn strategy_for(&self, method: PaymentMethod) -> &dyn PaymentStrategy {
        match method {
            PaymentMethod::Cash => self.cash.as_ref(),
            PaymentMethod::CreditCard => self.credit_card.as_ref(),
            PaymentMethod::Upi => self.upi.as_ref(),
        }
    }

    /// Charge `amount` using `method`.
    pub fn process_payment(
        &self,
        amount: Fee,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, PaymentError> {
        tracing::debug!(amount, %method, "dispatching payment");
        self.strategy_for(method).process_payment(amount)
    }

    /// Charge `amount` using a textual method tag.
    ///
    /// # Errors
    ///
    /// [`PaymentError::UnsupportedMethod`] if the tag is not a known method;
    /// no strategy runs in that case.
    pub fn process_payment_tag(
        &self,
        amount: Fee,
        tag: &str,
    ) -> Result<PaymentReceipt, PaymentError> {
        let method = tag
            .parse::<PaymentMethod>()
            .map_err(|_| PaymentError::UnsupportedMethod(tag.to_string()))?;
        self.process_payment(amount, method)
    }
}
