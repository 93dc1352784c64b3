//! Domain services for the Stock Ledger.
//!
//! Free functions over entities, used by reporting and by tests that
//! check the conservation invariant from outside.

use chrono::{DateTime, Utc};

use super::entities::{FoodId, Purchase, User, UserRole};

/// Total quantity reserved by live purchases of a listing.
pub fn reserved_for_listing<'a>(
    purchases: impl Iterator<Item = &'a Purchase>,
    food_id: FoodId,
) -> u32 {
    purchases
        .filter(|p| p.food_id == food_id)
        .map(|p| p.quantity_bought)
        .sum()
}

/// Number of users holding the given role.
pub fn count_by_role<'a>(users: impl Iterator<Item = &'a User>, role: UserRole) -> usize {
    users.filter(|u| u.role == role).count()
}

/// Number of purchases made at or after the cutoff.
pub fn purchases_since<'a>(
    purchases: impl Iterator<Item = &'a Purchase>,
    cutoff: DateTime<Utc>,
) -> usize {
    purchases.filter(|p| p.purchase_date >= cutoff).count()
}
