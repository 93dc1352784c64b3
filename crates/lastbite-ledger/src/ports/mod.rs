//! Ports: abstractions consumed by outer layers.

pub mod storage;

pub use storage::MarketStore;
