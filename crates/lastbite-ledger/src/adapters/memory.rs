use parking_lot::RwLock;

use crate::domain::{
    FoodId, FoodListing, ListingUpdate, MarketResult, MarketStats, NewListing, NewPurchase,
    NewUser, Purchase, PurchaseId, StockLedger, User, UserId, UserUpdate,
};
use crate::ports::MarketStore;

/// In-memory implementation of `MarketStore`.
///
/// The write guard serializes mutating operations across the whole store,
/// which subsumes the per-listing ordering the atomicity contract needs:
/// a ledger operation runs read-validate-write under one guard and is
/// never observed half-applied.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<StockLedger>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StockLedger::new()),
        }
    }
}

impl MarketStore for InMemoryStore {
    fn create_user(&self, new: NewUser) -> MarketResult<User> {
        self.inner.write().create_user(new)
    }

    fn user(&self, id: UserId) -> MarketResult<User> {
        self.inner.read().user(id)
    }

    fn user_by_email(&self, email: &str) -> MarketResult<Option<User>> {
        Ok(self.inner.read().user_by_email(email))
    }

    fn users(&self) -> MarketResult<Vec<User>> {
        Ok(self.inner.read().users())
    }

    fn update_user(&self, id: UserId, update: UserUpdate) -> MarketResult<User> {
        self.inner.write().update_user(id, update)
    }

    fn delete_user(&self, id: UserId) -> MarketResult<()> {
        self.inner.write().delete_user(id)
    }

    fn create_listing(&self, new: NewListing) -> MarketResult<FoodListing> {
        self.inner.write().create_listing(new)
    }

    fn listing(&self, id: FoodId) -> MarketResult<FoodListing> {
        self.inner.read().listing(id)
    }

    fn listings(&self, owner: Option<UserId>) -> MarketResult<Vec<FoodListing>> {
        Ok(self.inner.read().listings(owner))
    }

    fn update_listing(&self, id: FoodId, update: ListingUpdate) -> MarketResult<FoodListing> {
        self.inner.write().update_listing(id, update)
    }

    fn delete_listing(&self, id: FoodId) -> MarketResult<()> {
        self.inner.write().delete_listing(id)
    }

    fn create_purchase(&self, new: NewPurchase) -> MarketResult<Purchase> {
        self.inner.write().create_purchase(new)
    }

    fn purchase(&self, id: PurchaseId) -> MarketResult<Purchase> {
        self.inner.read().purchase(id)
    }

    fn purchases(&self, buyer: Option<UserId>) -> MarketResult<Vec<Purchase>> {
        Ok(self.inner.read().purchases(buyer))
    }

    fn update_purchase_quantity(
        &self,
        id: PurchaseId,
        new_quantity: Option<u32>,
    ) -> MarketResult<Purchase> {
        self.inner.write().update_purchase_quantity(id, new_quantity)
    }

    fn delete_purchase(&self, id: PurchaseId) -> MarketResult<()> {
        self.inner.write().delete_purchase(id)
    }

    fn stats(&self) -> MarketResult<MarketStats> {
        Ok(self.inner.read().stats())
    }
}
