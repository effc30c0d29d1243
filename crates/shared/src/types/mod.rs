//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{AMOUNT_SCALE, AmountError, AmountInput, AmountNumber, MAX_AMOUNT};
