//! # lastbite-ledger
//!
//! Stock Ledger core for the Last Bite marketplace.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: authoritative state for users, food
//!   listings, and purchases
//! - **Conservation Invariant**: for every listing,
//!   `original_stock == current_stock + sum(live purchases' quantity)`
//! - **Single Writer**: every operation is one atomic unit; a failed
//!   operation leaves the ledger untouched
//!
//! ## Structure
//!
//! - `domain/` - entities, errors, validation, and the `StockLedger`
//!   state machine
//! - `ports/` - the `MarketStore` storage port consumed by the API layer
//! - `adapters/` - in-memory store implementing the port
//!
//! The API layer (lastbite-gateway) performs request shaping only; all
//! domain validation lives here so there is exactly one authoritative
//! rule set.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
