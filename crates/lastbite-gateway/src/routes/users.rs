//! User CRUD endpoints.
//!
//! Deleting a user cascades through the ledger to its owned listings and
//! its purchases, as one unit.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use lastbite_ledger::{NewUser, User, UserId, UserUpdate};

use super::{message_only, Envelope};
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(fetch).patch(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Result<Json<Envelope<Vec<User>>>, ApiError> {
    let users = state.store.users()?;
    Ok(Envelope::new("All users", users))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<Envelope<User>>), ApiError> {
    let user = state.store.create_user(payload)?;
    Ok((StatusCode::CREATED, Envelope::new("User created", user)))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Envelope<User>>, ApiError> {
    let user = state.store.user(id)?;
    Ok(Envelope::new(format!("User {}", id), user))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(payload): Json<UserUpdate>,
) -> Result<Json<Envelope<User>>, ApiError> {
    let user = state.store.update_user(id, payload)?;
    Ok(Envelope::new(format!("User {} updated", id), user))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.store.delete_user(id)?;
    Ok(message_only(format!("User {} deleted", id)))
}
