//! Order API token handlers.
//!
//! The order API pushes its bearer token ahead of sending orders. It is kept
//! in the credential cache and used for artwork downloads until it goes stale
//! or an intake request brings its own `Authorization` header.

use axum::{extract::State, http::StatusCode, Json};
use labelbridge_core::Credential;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::handlers::ErrorResponse;
use crate::metrics::TOKENS_SUBMITTED;
use crate::state::AppState;

/// Request body for submitting a token
#[derive(Debug, Deserialize)]
pub struct TokenBody {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: String,
    pub received_at: String,
}

#[derive(Debug, Serialize)]
pub struct TokenStatusResponse {
    /// Whether a fresh token is available.
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
    pub max_age_secs: i64,
}

/// Store a token for later artwork downloads
pub async fn submit_token(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TokenBody>,
) -> Result<Json<TokenResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(credential) = Credential::from_authorization_header(&body.token) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("token must not be empty")),
        ));
    };

    let received_at = credential.received_at;
    state.credentials().store(credential).await;
    TOKENS_SUBMITTED.inc();
    info!(received_at = %received_at, "Order API token received");

    Ok(Json(TokenResponse {
        message: format!("Token received {}", received_at.format("%Y-%m-%d")),
        received_at: received_at.to_rfc3339(),
    }))
}

/// Report whether a usable token is cached
pub async fn token_status(State(state): State<Arc<AppState>>) -> Json<TokenStatusResponse> {
    let current = state.credentials().current().await;
    Json(TokenStatusResponse {
        present: current.is_some(),
        received_at: current.map(|c| c.received_at.to_rfc3339()),
        max_age_secs: state.credentials().max_age().num_seconds(),
    })
}
