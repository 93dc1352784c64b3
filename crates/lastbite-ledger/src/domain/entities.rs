//! # Domain Entities for the Stock Ledger
//!
//! Core data structures for the marketplace.
//!
//! ## Type Decisions
//!
//! - `stock: u32` and `quantity_bought: u32` - non-negativity of stock is
//!   a type-level guarantee; the ledger only has to prove that every
//!   subtraction was checked first.
//! - Ids are sequential `u64` values assigned by the store, matching the
//!   relational origin of the data model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type FoodId = u64;
pub type PurchaseId = u64;

/// Role of a user account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    StoreOwner,
    Admin,
}

/// A registered user. Owns zero or more food listings (as a store owner)
/// and zero or more purchases (as a buyer). Deleting a user cascades to
/// both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique across all users.
    pub email: String,
    pub role: UserRole,
    /// Optional external-identity token (e.g. a federated auth uid).
    pub external_uid: Option<String>,
}

/// A surplus food listing offered by a store owner.
///
/// INVARIANT: `stock` reflects the units still available after all live
/// purchases; it is only ever mutated together with a purchase row, in
/// one atomic ledger operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodListing {
    pub id: FoodId,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// The owning store owner.
    pub user_id: UserId,
    /// Units still available for purchase.
    pub stock: u32,
    /// Price per unit, >= 0.
    pub price: f64,
    /// Stored but never enforced; expiry sweeps are out of scope.
    pub expiry_date: Option<NaiveDate>,
}

/// A completed purchase. A purchase that exists has already been fully
/// applied to its listing's stock; there is no pending state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    /// The buyer.
    pub user_id: UserId,
    /// The listing this purchase reserves stock from.
    pub food_id: FoodId,
    /// Exact amount by which this purchase has decremented the listing's
    /// stock. Always >= 1.
    pub quantity_bought: u32,
    /// Server-assigned at creation.
    pub purchase_date: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request payloads
//
// Deserialized by the gateway, validated by the ledger. Defaults mirror
// the original API surface (stock defaults to 1, price to 0.0).
// ---------------------------------------------------------------------------

/// Payload for creating a user.
#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub external_uid: Option<String>,
}

/// Partial update for a user. `None` fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub external_uid: Option<String>,
}

/// Payload for creating a food listing.
#[derive(Clone, Debug, Deserialize)]
pub struct NewListing {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub user_id: UserId,
    #[serde(default = "default_stock")]
    pub stock: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

fn default_stock() -> u32 {
    1
}

/// Partial update for a food listing. `None` fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListingUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub price: Option<f64>,
    pub expiry_date: Option<NaiveDate>,
}

/// Payload for creating a purchase.
#[derive(Clone, Debug, Deserialize)]
pub struct NewPurchase {
    pub user_id: UserId,
    pub food_id: FoodId,
    pub quantity_bought: u32,
}

/// Partial update for a purchase. An omitted quantity is a no-op.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PurchaseUpdate {
    pub quantity_bought: Option<u32>,
}

/// Aggregate counters for the admin dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MarketStats {
    pub users_total: usize,
    pub customers: usize,
    pub store_owners: usize,
    pub admins: usize,
    pub foods_total: usize,
    pub purchases_total: usize,
    /// Purchases made within the last 7 days.
    pub purchases_recent_week: usize,
}
