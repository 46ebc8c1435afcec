//! # pklot-payment: Fee Collection
//!
//! The one Strategy seam of the stack. Callers hand an amount and a
//! [`PaymentMethod`](pklot_core::PaymentMethod) to [`PaymentService`]; the
//! service picks the strategy for that method and runs it.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): `PaymentStrategy`, `PaymentReceipt`,
//!   `PaymentError`. A gateway integration implements the trait and is
//!   installed with [`PaymentService::with_strategy`]; callers do not change.
//!
//! - **Strategies** (`strategies.rs`): `Cash`, `CreditCard`, `Upi`. All three
//!   announce the payment through `tracing` and return a receipt. None of
//!   them moves money.
//!
//! - **Service** (`service.rs`): exhaustive dispatch on the method enum, plus
//!   a tag-based entry point that rejects unknown methods.

pub mod service;
pub mod strategies;
pub mod traits;

pub use service::PaymentService;
pub use strategies::{Cash, CreditCard, Upi};
pub use traits::{PaymentError, PaymentReceipt, PaymentStrategy};
