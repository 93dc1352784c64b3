use crate::domain::{
    FoodId, FoodListing, ListingUpdate, MarketResult, MarketStats, NewListing, NewPurchase,
    NewUser, Purchase, PurchaseId, User, UserId, UserUpdate,
};

/// Storage port for the marketplace.
///
/// Every method is one atomic unit: it either fully commits or fails with
/// the ledger unchanged, and no partial state is visible to concurrent
/// callers. Implementations must serialize stock-affecting operations per
/// listing; the in-memory adapter does so with a single write lock.
pub trait MarketStore: Send + Sync {
    // Users
    fn create_user(&self, new: NewUser) -> MarketResult<User>;
    fn user(&self, id: UserId) -> MarketResult<User>;
    fn user_by_email(&self, email: &str) -> MarketResult<Option<User>>;
    fn users(&self) -> MarketResult<Vec<User>>;
    fn update_user(&self, id: UserId, update: UserUpdate) -> MarketResult<User>;
    fn delete_user(&self, id: UserId) -> MarketResult<()>;

    // Food listings
    fn create_listing(&self, new: NewListing) -> MarketResult<FoodListing>;
    fn listing(&self, id: FoodId) -> MarketResult<FoodListing>;
    fn listings(&self, owner: Option<UserId>) -> MarketResult<Vec<FoodListing>>;
    fn update_listing(&self, id: FoodId, update: ListingUpdate) -> MarketResult<FoodListing>;
    fn delete_listing(&self, id: FoodId) -> MarketResult<()>;

    // Purchases
    fn create_purchase(&self, new: NewPurchase) -> MarketResult<Purchase>;
    fn purchase(&self, id: PurchaseId) -> MarketResult<Purchase>;
    fn purchases(&self, buyer: Option<UserId>) -> MarketResult<Vec<Purchase>>;
    fn update_purchase_quantity(
        &self,
        id: PurchaseId,
        new_quantity: Option<u32>,
    ) -> MarketResult<Purchase>;
    fn delete_purchase(&self, id: PurchaseId) -> MarketResult<()>;

    // Reporting
    fn stats(&self) -> MarketResult<MarketStats>;
}
