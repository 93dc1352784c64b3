//! # Stock Ledger - Purchase/Stock Consistency Core
//!
//! A small transactional state machine over `FoodListing.stock` and
//! `Purchase.quantity_bought`.
//!
//! ## Invariants Enforced
//!
//! - CONSERVATION: for every listing, original stock equals current stock
//!   plus the sum of quantities held by live purchases
//! - NON-NEGATIVITY: `stock` is `u32` and every subtraction is validated
//!   before it is applied
//! - ATOMICITY: each operation validates every failure path before the
//!   first mutation, so a failed operation leaves the ledger untouched
//! - CASCADE: deleting a listing removes its purchases in the same unit;
//!   deleting a user removes its listings and purchases in the same unit

use std::collections::HashMap;

use chrono::{Duration, Utc};

use super::entities::{
    FoodId, FoodListing, ListingUpdate, MarketStats, NewListing, NewPurchase, NewUser, Purchase,
    PurchaseId, User, UserId, UserRole, UserUpdate,
};
use super::errors::{MarketError, MarketResult};
use super::services;
use super::validate;

/// The authoritative in-memory state of the marketplace.
///
/// `StockLedger` is a plain single-threaded state machine; callers that
/// need concurrent access wrap it behind the `MarketStore` port (see
/// `adapters::InMemoryStore`), whose write guard provides the
/// single-writer-per-operation ordering the atomicity contract requires.
#[derive(Debug, Default)]
pub struct StockLedger {
    users: HashMap<UserId, User>,
    foods: HashMap<FoodId, FoodListing>,
    purchases: HashMap<PurchaseId, Purchase>,
    next_user_id: UserId,
    next_food_id: FoodId,
    next_purchase_id: PurchaseId,
}

impl StockLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            foods: HashMap::new(),
            purchases: HashMap::new(),
            next_user_id: 1,
            next_food_id: 1,
            next_purchase_id: 1,
        }
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    /// Creates a user.
    ///
    /// # Errors
    /// - `Validation` on empty/overlong name, malformed email, or an email
    ///   already registered to another user
    pub fn create_user(&mut self, new: NewUser) -> MarketResult<User> {
        validate::validate_name(&new.name)?;
        validate::validate_email(&new.email)?;
        self.ensure_email_free(&new.email, None)?;

        let id = self.next_user_id;
        self.next_user_id += 1;
        let user = User {
            id,
            name: new.name.trim().to_string(),
            email: new.email,
            role: new.role,
            external_uid: new.external_uid,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    /// Looks up a user by id.
    pub fn user(&self, id: UserId) -> MarketResult<User> {
        self.users
            .get(&id)
            .cloned()
            .ok_or(MarketError::UserNotFound(id))
    }

    /// Looks up a user by email. `None` when no user matches.
    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.users.values().find(|u| u.email == email).cloned()
    }

    /// Lists all users, ordered by id.
    pub fn users(&self) -> Vec<User> {
        let mut all: Vec<_> = self.users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        all
    }

    /// Applies a partial update to a user.
    pub fn update_user(&mut self, id: UserId, update: UserUpdate) -> MarketResult<User> {
        if !self.users.contains_key(&id) {
            return Err(MarketError::UserNotFound(id));
        }
        if let Some(ref name) = update.name {
            validate::validate_name(name)?;
        }
        if let Some(ref email) = update.email {
            validate::validate_email(email)?;
            self.ensure_email_free(email, Some(id))?;
        }

        let user = self.users.get_mut(&id).expect("checked above");
        if let Some(name) = update.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(external_uid) = update.external_uid {
            user.external_uid = Some(external_uid);
        }
        Ok(user.clone())
    }

    /// Deletes a user together with its owned listings (and their
    /// purchases) and the purchases it made, as one unit.
    ///
    /// Purchases the user made against other owners' listings are removed
    /// without restoring stock, matching cascade-on-delete semantics: a
    /// cascade is a bulk erasure, not a reversal.
    pub fn delete_user(&mut self, id: UserId) -> MarketResult<()> {
        if !self.users.contains_key(&id) {
            return Err(MarketError::UserNotFound(id));
        }
        let owned: Vec<FoodId> = self
            .foods
            .values()
            .filter(|f| f.user_id == id)
            .map(|f| f.id)
            .collect();
        for food_id in owned {
            self.foods.remove(&food_id);
            self.purchases.retain(|_, p| p.food_id != food_id);
        }
        self.purchases.retain(|_, p| p.user_id != id);
        self.users.remove(&id);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Food listings
    // -----------------------------------------------------------------------

    /// Creates a food listing.
    ///
    /// # Errors
    /// - `UserNotFound` if the owner does not exist
    /// - `Validation` on bad name or negative/non-finite price
    pub fn create_listing(&mut self, new: NewListing) -> MarketResult<FoodListing> {
        if !self.users.contains_key(&new.user_id) {
            return Err(MarketError::UserNotFound(new.user_id));
        }
        validate::validate_name(&new.name)?;
        validate::validate_price(new.price)?;

        let id = self.next_food_id;
        self.next_food_id += 1;
        let listing = FoodListing {
            id,
            name: new.name.trim().to_string(),
            description: new.description,
            category: new.category,
            user_id: new.user_id,
            stock: new.stock,
            price: new.price,
            expiry_date: new.expiry_date,
        };
        self.foods.insert(id, listing.clone());
        Ok(listing)
    }

    /// Looks up a listing by id.
    pub fn listing(&self, id: FoodId) -> MarketResult<FoodListing> {
        self.foods
            .get(&id)
            .cloned()
            .ok_or(MarketError::FoodNotFound(id))
    }

    /// Lists listings, optionally filtered by owner, ordered by id.
    pub fn listings(&self, owner: Option<UserId>) -> Vec<FoodListing> {
        let mut all: Vec<_> = self
            .foods
            .values()
            .filter(|f| owner.map_or(true, |o| f.user_id == o))
            .cloned()
            .collect();
        all.sort_by_key(|f| f.id);
        all
    }

    /// Applies a partial update to a listing.
    ///
    /// Directly setting `stock` here is an owner-side restock/correction;
    /// it does not touch purchases, so it rebases the conservation
    /// baseline for the listing.
    pub fn update_listing(&mut self, id: FoodId, update: ListingUpdate) -> MarketResult<FoodListing> {
        if !self.foods.contains_key(&id) {
            return Err(MarketError::FoodNotFound(id));
        }
        if let Some(ref name) = update.name {
            validate::validate_name(name)?;
        }
        if let Some(price) = update.price {
            validate::validate_price(price)?;
        }

        let listing = self.foods.get_mut(&id).expect("checked above");
        if let Some(name) = update.name {
            listing.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            listing.description = Some(description);
        }
        if let Some(category) = update.category {
            listing.category = Some(category);
        }
        if let Some(stock) = update.stock {
            listing.stock = stock;
        }
        if let Some(price) = update.price {
            listing.price = price;
        }
        if let Some(expiry_date) = update.expiry_date {
            listing.expiry_date = Some(expiry_date);
        }
        Ok(listing.clone())
    }

    /// Deletes a listing and all of its purchases as a single unit.
    ///
    /// Purchases referencing the listing must never be left dangling with
    /// a stock reference that can no longer be resolved.
    pub fn delete_listing(&mut self, id: FoodId) -> MarketResult<()> {
        if self.foods.remove(&id).is_none() {
            return Err(MarketError::FoodNotFound(id));
        }
        self.purchases.retain(|_, p| p.food_id != id);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Purchases - the three ledger operations
    // -----------------------------------------------------------------------

    /// Creates a purchase, decrementing the listing's stock in the same
    /// unit.
    ///
    /// # Errors
    /// - `UserNotFound` / `FoodNotFound` if either reference is missing
    /// - `Validation` if `quantity_bought < 1`
    /// - `InsufficientStock` if the quantity exceeds available stock
    pub fn create_purchase(&mut self, new: NewPurchase) -> MarketResult<Purchase> {
        if !self.users.contains_key(&new.user_id) {
            return Err(MarketError::UserNotFound(new.user_id));
        }
        let available = self
            .foods
            .get(&new.food_id)
            .ok_or(MarketError::FoodNotFound(new.food_id))?
            .stock;
        validate::validate_quantity(new.quantity_bought)?;
        if new.quantity_bought > available {
            return Err(MarketError::InsufficientStock {
                requested: new.quantity_bought,
                available,
            });
        }

        // All checks passed; apply both sides of the unit.
        let listing = self.foods.get_mut(&new.food_id).expect("checked above");
        listing.stock -= new.quantity_bought;

        let id = self.next_purchase_id;
        self.next_purchase_id += 1;
        let purchase = Purchase {
            id,
            user_id: new.user_id,
            food_id: new.food_id,
            quantity_bought: new.quantity_bought,
            purchase_date: Utc::now(),
        };
        self.purchases.insert(id, purchase.clone());
        Ok(purchase)
    }

    /// Looks up a purchase by id.
    pub fn purchase(&self, id: PurchaseId) -> MarketResult<Purchase> {
        self.purchases
            .get(&id)
            .cloned()
            .ok_or(MarketError::PurchaseNotFound(id))
    }

    /// Lists purchases, optionally filtered by buyer, ordered by id.
    pub fn purchases(&self, buyer: Option<UserId>) -> Vec<Purchase> {
        let mut all: Vec<_> = self
            .purchases
            .values()
            .filter(|p| buyer.map_or(true, |b| p.user_id == b))
            .cloned()
            .collect();
        all.sort_by_key(|p| p.id);
        all
    }

    /// Changes a purchase's quantity, applying the compensating stock
    /// delta in the same unit. An omitted quantity is a no-op.
    ///
    /// The delta is computed from one before/after snapshot: growing a
    /// purchase consumes additional stock, shrinking one releases it, and
    /// the purchase's own already-reserved amount never counts against
    /// the increase.
    ///
    /// # Errors
    /// - `PurchaseNotFound` if the purchase does not exist
    /// - `Validation` if the new quantity is < 1
    /// - `InsufficientStock` if the increase exceeds remaining stock
    pub fn update_purchase_quantity(
        &mut self,
        id: PurchaseId,
        new_quantity: Option<u32>,
    ) -> MarketResult<Purchase> {
        let purchase = self
            .purchases
            .get(&id)
            .cloned()
            .ok_or(MarketError::PurchaseNotFound(id))?;
        let new_quantity = match new_quantity {
            Some(q) => q,
            None => return Ok(purchase),
        };
        validate::validate_quantity(new_quantity)?;

        let available = self
            .foods
            .get(&purchase.food_id)
            .ok_or(MarketError::FoodNotFound(purchase.food_id))?
            .stock;
        let delta = i64::from(new_quantity) - i64::from(purchase.quantity_bought);
        if delta > i64::from(available) {
            return Err(MarketError::InsufficientStock {
                requested: new_quantity,
                available: available + purchase.quantity_bought,
            });
        }

        let listing = self.foods.get_mut(&purchase.food_id).expect("checked above");
        // An owner restock via update_listing can push stock near u32::MAX
        // while purchases exist; clamp so releasing a reservation can
        // never wrap.
        listing.stock = (i64::from(listing.stock) - delta).clamp(0, i64::from(u32::MAX)) as u32;

        let row = self.purchases.get_mut(&id).expect("checked above");
        row.quantity_bought = new_quantity;
        Ok(row.clone())
    }

    /// Deletes a purchase, restoring its reserved quantity to the
    /// listing's stock in the same unit.
    ///
    /// If the listing has already been cascade-deleted the restoration is
    /// a no-op and the purchase deletion still proceeds.
    pub fn delete_purchase(&mut self, id: PurchaseId) -> MarketResult<()> {
        let purchase = self
            .purchases
            .remove(&id)
            .ok_or(MarketError::PurchaseNotFound(id))?;
        if let Some(listing) = self.foods.get_mut(&purchase.food_id) {
            listing.stock = listing.stock.saturating_add(purchase.quantity_bought);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reporting
    // -----------------------------------------------------------------------

    /// Total quantity currently reserved by live purchases of a listing.
    pub fn reserved(&self, food_id: FoodId) -> u32 {
        services::reserved_for_listing(self.purchases.values(), food_id)
    }

    /// Aggregate counters for the admin dashboard.
    pub fn stats(&self) -> MarketStats {
        let users: Vec<_> = self.users.values().collect();
        let week_ago = Utc::now() - Duration::days(7);
        MarketStats {
            users_total: users.len(),
            customers: services::count_by_role(users.iter().copied(), UserRole::Customer),
            store_owners: services::count_by_role(users.iter().copied(), UserRole::StoreOwner),
            admins: services::count_by_role(users.iter().copied(), UserRole::Admin),
            foods_total: self.foods.len(),
            purchases_total: self.purchases.len(),
            purchases_recent_week: services::purchases_since(self.purchases.values(), week_ago),
        }
    }

    fn ensure_email_free(&self, email: &str, exclude: Option<UserId>) -> MarketResult<()> {
        let taken = self
            .users
            .values()
            .any(|u| u.email == email && exclude != Some(u.id));
        if taken {
            return Err(MarketError::Validation(format!(
                "email already registered: {}",
                email
            )));
        }
        Ok(())
    }
}
