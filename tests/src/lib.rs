//! # Last Bite Test Suite
//!
//! Unified test crate for properties that span crate boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── stock_properties.rs   # Ledger invariants through the storage port
//!     └── marketplace_flows.rs  # Full HTTP lifecycle against a live gateway
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lastbite-tests
//!
//! # By category
//! cargo test -p lastbite-tests integration::stock_properties
//! cargo test -p lastbite-tests integration::marketplace_flows
//! ```

#![allow(dead_code)]
