//! # Marketplace Flows
//!
//! Full lifecycle choreography against a live gateway: users sign up,
//! an owner lists food, customers buy, the admin surface reports on it
//! all. The gateway crate's own tests cover route-by-route behavior;
//! these follow one story across many routes.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use lastbite_gateway::{build_router, AppState, GatewayConfig};
    use lastbite_ledger::InMemoryStore;

    const ADMIN_SECRET: &str = "flow_test_secret";

    async fn spawn_gateway() -> String {
        let store = Arc::new(InMemoryStore::new());
        let mut config = GatewayConfig::default();
        config.admin.secret_key = ADMIN_SECRET.to_string();

        let app = build_router(AppState::new(store, config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{}", addr)
    }

    async fn post(client: &reqwest::Client, url: &str, body: Value) -> Value {
        let response = client.post(url).json(&body).send().await.expect("request");
        assert!(
            response.status().is_success(),
            "POST {} failed: {}",
            url,
            response.status()
        );
        response.json().await.expect("json body")
    }

    async fn admin_get(client: &reqwest::Client, url: &str) -> Value {
        client
            .get(url)
            .header("x-admin-secret", ADMIN_SECRET)
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json body")
    }

    /// Two owners, two customers, a morning of trade, and a stats check.
    #[tokio::test]
    async fn test_full_marketplace_day() {
        let base = spawn_gateway().await;
        let client = reqwest::Client::new();

        // Sign-ups.
        let mut ids = Vec::new();
        for (name, role) in [
            ("Maria", "store_owner"),
            ("Lee", "store_owner"),
            ("Sam", "customer"),
            ("Ana", "customer"),
        ] {
            let body = post(
                &client,
                &format!("{base}/api/users"),
                json!({
                    "name": name,
                    "email": format!("{}@example.com", name.to_lowercase()),
                    "role": role
                }),
            )
            .await;
            ids.push(body["data"]["id"].as_u64().unwrap());
        }
        let (maria, lee, sam, ana) = (ids[0], ids[1], ids[2], ids[3]);

        // Listings.
        let bread = post(
            &client,
            &format!("{base}/api/foods"),
            json!({"name": "Sourdough", "user_id": maria, "stock": 12, "price": 3.0}),
        )
        .await["data"]["id"]
            .as_u64()
            .unwrap();
        let soup = post(
            &client,
            &format!("{base}/api/foods"),
            json!({"name": "Minestrone", "user_id": lee, "stock": 8, "price": 4.5}),
        )
        .await["data"]["id"]
            .as_u64()
            .unwrap();

        // Trade.
        post(
            &client,
            &format!("{base}/api/purchases"),
            json!({"user_id": sam, "food_id": bread, "quantity_bought": 5}),
        )
        .await;
        post(
            &client,
            &format!("{base}/api/purchases"),
            json!({"user_id": ana, "food_id": bread, "quantity_bought": 2}),
        )
        .await;
        post(
            &client,
            &format!("{base}/api/purchases"),
            json!({"user_id": ana, "food_id": soup, "quantity_bought": 8}),
        )
        .await;

        // Per-owner listing filter.
        let marias: Value = client
            .get(format!("{base}/api/foods?user_id={maria}"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let marias = marias["data"].as_array().unwrap();
        assert_eq!(marias.len(), 1);
        assert_eq!(marias[0]["stock"], 5);

        // Admin view of the whole day.
        let stats = admin_get(&client, &format!("{base}/api/admin/stats")).await;
        assert_eq!(stats["data"]["users_total"], 4);
        assert_eq!(stats["data"]["store_owners"], 2);
        assert_eq!(stats["data"]["customers"], 2);
        assert_eq!(stats["data"]["foods_total"], 2);
        assert_eq!(stats["data"]["purchases_total"], 3);
        assert_eq!(stats["data"]["purchases_recent_week"], 3);
    }

    /// Deleting a customer over HTTP drops their purchases from the admin
    /// purchase feed without resurrecting stock.
    #[tokio::test]
    async fn test_customer_offboarding_flow() {
        let base = spawn_gateway().await;
        let client = reqwest::Client::new();

        let owner = post(
            &client,
            &format!("{base}/api/users"),
            json!({"name": "Maria", "email": "maria@example.com", "role": "store_owner"}),
        )
        .await["data"]["id"]
            .as_u64()
            .unwrap();
        let buyer = post(
            &client,
            &format!("{base}/api/users"),
            json!({"name": "Sam", "email": "sam@example.com", "role": "customer"}),
        )
        .await["data"]["id"]
            .as_u64()
            .unwrap();
        let food = post(
            &client,
            &format!("{base}/api/foods"),
            json!({"name": "Bagels", "user_id": owner, "stock": 10}),
        )
        .await["data"]["id"]
            .as_u64()
            .unwrap();
        post(
            &client,
            &format!("{base}/api/purchases"),
            json!({"user_id": buyer, "food_id": food, "quantity_bought": 4}),
        )
        .await;

        let response = client
            .delete(format!("{base}/api/users/{buyer}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let purchases = admin_get(&client, &format!("{base}/api/admin/purchases")).await;
        assert_eq!(purchases["data"].as_array().unwrap().len(), 0);
        // Sold units stay sold.
        let listing: Value = client
            .get(format!("{base}/api/foods/{food}"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listing["data"]["stock"], 6);
    }

    /// Profile edits flow through PATCH and show up in later reads.
    #[tokio::test]
    async fn test_user_profile_update_flow() {
        let base = spawn_gateway().await;
        let client = reqwest::Client::new();

        let user = post(
            &client,
            &format!("{base}/api/users"),
            json!({"name": "Sam", "email": "sam@example.com", "role": "customer"}),
        )
        .await["data"]["id"]
            .as_u64()
            .unwrap();

        let response = client
            .patch(format!("{base}/api/users/{user}"))
            .json(&json!({"name": "Samuel"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let fetched: Value = client
            .get(format!("{base}/api/users/{user}"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(fetched["data"]["name"], "Samuel");
        assert_eq!(fetched["data"]["email"], "sam@example.com");
    }
}
