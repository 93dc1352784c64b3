//! # Stock Ledger Properties
//!
//! Exercises the conservation invariant through the `MarketStore` port,
//! the way the gateway sees the store: for every listing, at all times,
//!
//! ```text
//! original_stock == current_stock + sum(quantity_bought of live purchases)
//! ```
//!
//! and no failed operation moves stock at all.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use lastbite_ledger::{
        FoodId, InMemoryStore, MarketError, MarketStore, NewListing, NewPurchase, NewUser,
        UserId, UserRole,
    };

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn store() -> Arc<dyn MarketStore> {
        Arc::new(InMemoryStore::new())
    }

    fn add_user(store: &dyn MarketStore, name: &str, role: UserRole) -> UserId {
        store
            .create_user(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                role,
                external_uid: None,
            })
            .expect("create user")
            .id
    }

    fn add_listing(store: &dyn MarketStore, owner: UserId, name: &str, stock: u32) -> FoodId {
        store
            .create_listing(NewListing {
                name: name.to_string(),
                description: None,
                category: None,
                user_id: owner,
                stock,
                price: 2.5,
                expiry_date: None,
            })
            .expect("create listing")
            .id
    }

    /// Assert the conservation equation for one listing against its
    /// seeded baseline.
    fn assert_conserved(store: &dyn MarketStore, food: FoodId, baseline: u32) {
        let listing = store.listing(food).expect("listing");
        let reserved: u32 = store
            .purchases(None)
            .expect("purchases")
            .iter()
            .filter(|p| p.food_id == food)
            .map(|p| p.quantity_bought)
            .sum();
        assert_eq!(
            listing.stock + reserved,
            baseline,
            "stock {} + reserved {} != baseline {}",
            listing.stock,
            reserved,
            baseline
        );
    }

    // =========================================================================
    // RANDOMIZED OPERATION SEQUENCES
    // =========================================================================

    /// Run a long random mix of buys, quantity updates, and refunds and
    /// check conservation after every single operation. Failed operations
    /// count too: they must leave the equation intact.
    #[test]
    fn test_conservation_holds_across_random_sequences() {
        let store = store();
        let owner = add_user(store.as_ref(), "Maria", UserRole::StoreOwner);
        let buyer = add_user(store.as_ref(), "Sam", UserRole::Customer);
        let baseline = 50;
        let food = add_listing(store.as_ref(), owner, "Day-old bread", baseline);

        let mut rng = StdRng::seed_from_u64(0x1a57_b17e);
        for _ in 0..500 {
            let live: Vec<u64> = store
                .purchases(None)
                .unwrap()
                .iter()
                .map(|p| p.id)
                .collect();
            match rng.gen_range(0..3) {
                0 => {
                    // Buy. May fail with InsufficientStock near the floor.
                    let _ = store.create_purchase(NewPurchase {
                        user_id: buyer,
                        food_id: food,
                        quantity_bought: rng.gen_range(1..=5),
                    });
                }
                1 if !live.is_empty() => {
                    // Resize an existing purchase, sometimes beyond what
                    // the listing can cover.
                    let id = live[rng.gen_range(0..live.len())];
                    let _ =
                        store.update_purchase_quantity(id, Some(rng.gen_range(1..=8)));
                }
                2 if !live.is_empty() => {
                    // Refund.
                    let id = live[rng.gen_range(0..live.len())];
                    store.delete_purchase(id).expect("delete live purchase");
                }
                _ => {}
            }
            assert_conserved(store.as_ref(), food, baseline);
        }
    }

    /// An omitted quantity on update is a no-op, not a reset.
    #[test]
    fn test_update_without_quantity_changes_nothing() {
        let store = store();
        let owner = add_user(store.as_ref(), "Maria", UserRole::StoreOwner);
        let buyer = add_user(store.as_ref(), "Sam", UserRole::Customer);
        let food = add_listing(store.as_ref(), owner, "Soup", 10);

        let purchase = store
            .create_purchase(NewPurchase {
                user_id: buyer,
                food_id: food,
                quantity_bought: 4,
            })
            .unwrap();

        let unchanged = store.update_purchase_quantity(purchase.id, None).unwrap();
        assert_eq!(unchanged.quantity_bought, 4);
        assert_eq!(store.listing(food).unwrap().stock, 6);
    }

    // =========================================================================
    // FAILURE ATOMICITY
    // =========================================================================

    /// Every rejected operation leaves the whole ledger untouched, not
    /// just the listing it targeted.
    #[test]
    fn test_failed_operations_leave_no_trace() {
        let store = store();
        let owner = add_user(store.as_ref(), "Maria", UserRole::StoreOwner);
        let buyer = add_user(store.as_ref(), "Sam", UserRole::Customer);
        let food = add_listing(store.as_ref(), owner, "Pastries", 3);

        // Oversell.
        let err = store
            .create_purchase(NewPurchase {
                user_id: buyer,
                food_id: food,
                quantity_bought: 4,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            MarketError::InsufficientStock {
                requested: 4,
                available: 3
            }
        ));

        // Unknown buyer.
        let err = store
            .create_purchase(NewPurchase {
                user_id: 999,
                food_id: food,
                quantity_bought: 1,
            })
            .unwrap_err();
        assert!(matches!(err, MarketError::UserNotFound(999)));

        // Zero quantity.
        let err = store
            .create_purchase(NewPurchase {
                user_id: buyer,
                food_id: food,
                quantity_bought: 0,
            })
            .unwrap_err();
        assert!(matches!(err, MarketError::Validation(_)));

        assert_eq!(store.listing(food).unwrap().stock, 3);
        assert!(store.purchases(None).unwrap().is_empty());
    }

    /// Exact-stock purchases succeed; the boundary is inclusive.
    #[test]
    fn test_exact_stock_is_purchasable() {
        let store = store();
        let owner = add_user(store.as_ref(), "Maria", UserRole::StoreOwner);
        let buyer = add_user(store.as_ref(), "Sam", UserRole::Customer);
        let food = add_listing(store.as_ref(), owner, "Last tray", 7);

        store
            .create_purchase(NewPurchase {
                user_id: buyer,
                food_id: food,
                quantity_bought: 7,
            })
            .expect("buying exactly the remaining stock succeeds");
        assert_eq!(store.listing(food).unwrap().stock, 0);
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    /// Hammer two listings from many threads at once. The per-operation
    /// write lock must keep both conservation equations true no matter
    /// how the threads interleave.
    #[test]
    fn test_concurrent_mixed_traffic_conserves_every_listing() {
        let store = store();
        let owner = add_user(store.as_ref(), "Maria", UserRole::StoreOwner);
        let buyer = add_user(store.as_ref(), "Sam", UserRole::Customer);
        let bread = add_listing(store.as_ref(), owner, "Bread", 20);
        let soup = add_listing(store.as_ref(), owner, "Soup", 20);

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                let food = if i % 2 == 0 { bread } else { soup };
                for _ in 0..10 {
                    if let Ok(p) = store.create_purchase(NewPurchase {
                        user_id: buyer,
                        food_id: food,
                        quantity_bought: 2,
                    }) {
                        // Shrink half of them back down, refund the rest.
                        if p.id % 2 == 0 {
                            let _ = store.update_purchase_quantity(p.id, Some(1));
                        } else {
                            let _ = store.delete_purchase(p.id);
                        }
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker thread");
        }

        assert_conserved(store.as_ref(), bread, 20);
        assert_conserved(store.as_ref(), soup, 20);
    }

    // =========================================================================
    // CASCADES
    // =========================================================================

    /// Deleting a buyer removes their purchases; deleting an owner removes
    /// their listings and every purchase against them.
    #[test]
    fn test_user_deletion_cascades_both_ways() {
        let store = store();
        let owner = add_user(store.as_ref(), "Maria", UserRole::StoreOwner);
        let buyer = add_user(store.as_ref(), "Sam", UserRole::Customer);
        let food = add_listing(store.as_ref(), owner, "Rolls", 10);
        store
            .create_purchase(NewPurchase {
                user_id: buyer,
                food_id: food,
                quantity_bought: 3,
            })
            .unwrap();

        store.delete_user(owner).unwrap();
        assert!(matches!(
            store.listing(food).unwrap_err(),
            MarketError::FoodNotFound(_)
        ));
        assert!(store.purchases(None).unwrap().is_empty());
        // The buyer survives the owner's deletion.
        assert!(store.user(buyer).is_ok());
    }

    /// A refund attempted after the listing's cascade already removed the
    /// purchase reports NotFound, never a panic.
    #[test]
    fn test_refund_after_cascade_reports_not_found() {
        let store = store();
        let owner = add_user(store.as_ref(), "Maria", UserRole::StoreOwner);
        let buyer = add_user(store.as_ref(), "Sam", UserRole::Customer);
        let food = add_listing(store.as_ref(), owner, "Buns", 5);
        let purchase = store
            .create_purchase(NewPurchase {
                user_id: buyer,
                food_id: food,
                quantity_bought: 2,
            })
            .unwrap();

        store.delete_listing(food).unwrap();
        assert!(matches!(
            store.delete_purchase(purchase.id).unwrap_err(),
            MarketError::PurchaseNotFound(_)
        ));
    }
}
