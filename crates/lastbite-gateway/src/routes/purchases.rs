//! Purchase endpoints.
//!
//! These are thin wrappers over the three Stock Ledger operations; the
//! gateway never computes or applies a stock delta itself.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use lastbite_ledger::{NewPurchase, Purchase, PurchaseId, PurchaseUpdate, UserId};
use serde::Deserialize;

use super::{message_only, Envelope};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ListQuery {
    user_id: Option<UserId>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(fetch).put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<Purchase>>>, ApiError> {
    let purchases = state.store.purchases(query.user_id)?;
    Ok(Envelope::new("All purchases", purchases))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewPurchase>,
) -> Result<(StatusCode, Json<Envelope<Purchase>>), ApiError> {
    let purchase = state.store.create_purchase(payload)?;
    Ok((
        StatusCode::CREATED,
        Envelope::new("Purchase created", purchase),
    ))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<PurchaseId>,
) -> Result<Json<Envelope<Purchase>>, ApiError> {
    let purchase = state.store.purchase(id)?;
    Ok(Envelope::new(format!("Purchase {}", id), purchase))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<PurchaseId>,
    Json(payload): Json<PurchaseUpdate>,
) -> Result<Json<Envelope<Purchase>>, ApiError> {
    let purchase = state
        .store
        .update_purchase_quantity(id, payload.quantity_bought)?;
    Ok(Envelope::new(format!("Purchase {} updated", id), purchase))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<PurchaseId>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.store.delete_purchase(id)?;
    Ok(message_only(format!("Purchase {} deleted", id)))
}
