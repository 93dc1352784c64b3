use super::entities::{FoodId, PurchaseId, UserId};
use thiserror::Error;

/// Error taxonomy for ledger operations.
///
/// All variants except `Storage` are recoverable at the API boundary and
/// surfaced to the caller as a structured message. A failed operation
/// never leaves a partial mutation behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Food listing not found: {0}")]
    FoodNotFound(FoodId),

    #[error("Purchase not found: {0}")]
    PurchaseNotFound(PurchaseId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl MarketError {
    /// True for the three domain errors the API layer maps to 4xx.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

/// Result type for ledger operations.
pub type MarketResult<T> = Result<T, MarketError>;
