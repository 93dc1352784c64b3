//! Domain layer: entities, errors, validation, and the stock ledger.

pub mod entities;
pub mod errors;
pub mod ledger;
pub mod services;
pub mod validate;

pub use entities::*;
pub use errors::*;
pub use ledger::*;
