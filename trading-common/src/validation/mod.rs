//! Validation of untrusted order input.
//!
//! Provides the symbol validator and the full order validator built on it.

mod order;
mod symbol;

pub use order::{OrderValidator, DEFAULT_MAX_QUANTITY};
pub use symbol::{SymbolValidationError, SymbolValidator, SymbolValidatorConfig};
