//! Food listing CRUD endpoints.
//!
//! Stock is only ever mutated by the ledger; the `PUT` update here is the
//! owner-side restock/correction path, not a purchase path.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use lastbite_ledger::{FoodId, FoodListing, ListingUpdate, NewListing, UserId};
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
) -> Result<Json<Envelope<Vec<FoodListing>>>, ApiError> {
    let foods = state.store.listings(query.user_id)?;
    Ok(Envelope::new("All food items", foods))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewListing>,
) -> Result<(StatusCode, Json<Envelope<FoodListing>>), ApiError> {
    let listing = state.store.create_listing(payload)?;
    Ok((StatusCode::CREATED, Envelope::new("Food created", listing)))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<FoodId>,
) -> Result<Json<Envelope<FoodListing>>, ApiError> {
    let listing = state.store.listing(id)?;
    Ok(Envelope::new(format!("Food item {}", id), listing))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<FoodId>,
    Json(payload): Json<ListingUpdate>,
) -> Result<Json<Envelope<FoodListing>>, ApiError> {
    let listing = state.store.update_listing(id, payload)?;
    Ok(Envelope::new(format!("Food item {} updated", id), listing))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<FoodId>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.store.delete_listing(id)?;
    Ok(message_only(format!("Food item {} deleted", id)))
}
