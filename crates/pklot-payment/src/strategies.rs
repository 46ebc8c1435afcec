//! # Built-in Payment Strategies
//!
//! Cash, credit card, and UPI. Each one announces the charge and returns a
//! receipt; there is no gateway behind any of them.

use pklot_core::{Fee, PaymentMethod};

use crate::traits::{PaymentError, PaymentReceipt, PaymentStrategy};

/// Cash at the booth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cash;

/// Credit card terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditCard;

/// UPI transfer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Upi;

impl PaymentStrategy for Cash {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Cash
    }

    fn process_payment(&self, amount: Fee) -> Result<PaymentReceipt, PaymentError> {
        tracing::info!(amount, "processing payment using cash");
        Ok(PaymentReceipt {
            method: self.method(),
            amount,
        })
    }
}

impl PaymentStrategy for CreditCard {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::CreditCard
    }

    fn process_payment(&self, amount: Fee) -> Result<PaymentReceipt, PaymentError> {
        tracing::info!(amount, "processing payment using credit card");
        Ok(PaymentReceipt {
            method: self.method(),
            amount,
        })
    }
}

impl PaymentStrategy for Upi {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Upi
    }

    fn process_payment(&self, amount: Fee) -> Result<PaymentReceipt, PaymentError> {
        tracing::info!(amount, "processing payment using UPI");
        Ok(PaymentReceipt {
            method: self.method(),
            amount,
        })
    }
}
