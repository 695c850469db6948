//! Order intake handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use labelbridge_core::{intake::StagedDesign, Credential, IntakeError, OrderItem};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::metrics::INTAKE_CREDENTIALS;
use crate::state::AppState;

/// Response for a staged order
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub message: String,
    pub reference: String,
    /// Records written and archived.
    pub records: usize,
    pub failed_downloads: usize,
    pub designs: Vec<StagedDesign>,
}

/// Error response carrying the order reference when known
#[derive(Debug, Serialize)]
pub struct OrderErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Accept one order item and stage it
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<OrderItem>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, (StatusCode, Json<OrderErrorResponse>)> {
    let Json(order) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected malformed order payload");
        (
            rejection.status(),
            Json(OrderErrorResponse {
                error: rejection.body_text(),
                reference: None,
            }),
        )
    })?;

    let credential = resolve_credential(&state, &headers).await;

    match state.processor().process(&order, credential.as_ref()).await {
        Ok(report) => Ok(Json(CreateOrderResponse {
            message: "Order item collected successfully".to_string(),
            reference: report.reference.clone(),
            records: report.records_staged(),
            failed_downloads: report.failed_downloads(),
            designs: report.designs,
        })),
        Err(e) => {
            let status = match e {
                IntakeError::Normalize { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                IntakeError::Staging { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((
                status,
                Json(OrderErrorResponse {
                    error: e.to_string(),
                    reference: Some(e.reference().to_string()),
                }),
            ))
        }
    }
}

/// The request's own `Authorization` header wins over the cached token.
async fn resolve_credential(state: &AppState, headers: &HeaderMap) -> Option<Credential> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(Credential::from_authorization_header);

    if let Some(credential) = from_header {
        INTAKE_CREDENTIALS.with_label_values(&["header"]).inc();
        return Some(credential);
    }

    match state.credentials().current().await {
        Some(credential) => {
            INTAKE_CREDENTIALS.with_label_values(&["cache"]).inc();
            Some(credential)
        }
        None => {
            INTAKE_CREDENTIALS.with_label_values(&["none"]).inc();
            None
        }
    }
}
