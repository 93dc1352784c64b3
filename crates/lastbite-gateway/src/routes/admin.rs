//! Admin surface: shared-secret login, global listings, and dashboard
//! stats.
//!
//! Everything except `login` sits behind the `x-admin-secret` header
//! check (see `middleware::admin_auth`). Session tokens returned by
//! `login` are advisory: protected routes re-check the shared secret on
//! every call.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use lastbite_ledger::{FoodId, FoodListing, MarketStats, Purchase, User, UserRole};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{message_only, Envelope};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminLogin {
    pub secret_key: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AdminSession {
    pub user: User,
    pub admin_token: String,
    pub expires_at: DateTime<Utc>,
}

/// The unprotected login route.
pub fn login_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Routes behind the shared-secret header check.
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/foods", get(list_foods))
        .route("/foods/:id", delete(delete_food))
        .route("/purchases", get(list_purchases))
        .route("/stats", get(stats))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLogin>,
) -> Result<Json<Envelope<AdminSession>>, ApiError> {
    if payload.secret_key != state.config.admin.secret_key {
        return Err(ApiError::unauthorized("Invalid admin credentials"));
    }
    let user = state
        .store
        .user_by_email(&payload.email)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    if user.role != UserRole::Admin {
        return Err(ApiError::forbidden("Access denied. Admin role required"));
    }

    let issued_at = Utc::now();
    let token_data = format!(
        "{}:{}:{}:{}",
        user.id,
        user.email,
        issued_at.to_rfc3339(),
        state.config.admin.secret_key
    );
    let admin_token = hex::encode(Sha256::digest(token_data.as_bytes()));

    Ok(Envelope::new(
        "Admin access granted",
        AdminSession {
            user,
            admin_token,
            expires_at: issued_at + chrono::Duration::hours(12),
        },
    ))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Envelope<Vec<User>>>, ApiError> {
    let users = state.store.users()?;
    Ok(Envelope::new("All users retrieved", users))
}

async fn list_foods(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<FoodListing>>>, ApiError> {
    let foods = state.store.listings(None)?;
    Ok(Envelope::new("All food listings retrieved", foods))
}

/// Admin delete goes through the same cascade unit as the core
/// DeleteFoodListing operation.
async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<FoodId>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.store.delete_listing(id)?;
    Ok(message_only(format!("Food listing {} deleted by admin", id)))
}

async fn list_purchases(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Purchase>>>, ApiError> {
    let purchases = state.store.purchases(None)?;
    Ok(Envelope::new("All purchases retrieved", purchases))
}

async fn stats(State(state): State<AppState>) -> Result<Json<Envelope<MarketStats>>, ApiError> {
    let stats = state.store.stats()?;
    Ok(Envelope::new("System statistics retrieved", stats))
}
