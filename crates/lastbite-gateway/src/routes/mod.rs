//! Route assembly and the shared response envelope.

pub mod admin;
pub mod foods;
pub mod purchases;
pub mod users;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::middleware::{cors_layer, require_admin_secret};
use crate::state::AppState;

/// Response envelope used by every endpoint: `{"message": ..., "data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            message: message.into(),
            data: Some(data),
        })
    }
}

/// Envelope without a data payload (deletes, liveness).
pub fn message_only(message: impl Into<String>) -> Json<Envelope<()>> {
    Json(Envelope {
        message: message.into(),
        data: None,
    })
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let admin_protected = admin::protected_router().route_layer(from_fn_with_state(
        state.clone(),
        require_admin_secret,
    ));

    let api = Router::new()
        .nest("/users", users::router())
        .nest("/foods", foods::router())
        .nest("/purchases", purchases::router())
        .nest("/admin", admin::login_router().merge(admin_protected));

    Router::new()
        .route("/", get(home))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors))
        .with_state(state)
}

async fn home() -> &'static str {
    "Last Bite Rescue API is running!"
}
