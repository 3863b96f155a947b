//! Request handlers and response shapes.
//!
//! The mockup endpoint always enumerates only the products that succeeded;
//! callers diff the response against their request to find omissions. Skip
//! reasons are surfaced through structured logs and skip counters rather
//! than the response body.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use uuid::Uuid;

use super::AppState;
use crate::mockup::{MockupError, ProductId, ProductRequest};

/// Body of `POST /api/mockups`.
///
/// Fields are optional so that validation owns the 400 message instead of
/// the deserializer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMockupsRequest {
    pub result_image_url: Option<String>,
    pub products: Option<Vec<ProductPayload>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub id: ProductId,
    pub name: String,
    pub base_image_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockupUrl {
    pub product_id: ProductId,
    pub product_name: String,
    pub mockup_image_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMockupsResponse {
    pub message: String,
    pub mockup_urls: Vec<MockupUrl>,
}

/// Errors surfaced to API callers.
#[derive(Debug)]
pub enum ApiError {
    /// Bad or missing request fields
    Validation(String),

    /// The result image could not be resolved
    SourceFetch(String),

    /// Unexpected failure; detail is exposed to the caller as-is
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Validation error: {}", msg),
            Self::SourceFetch(msg) => write!(f, "Source fetch error: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) | ApiError::SourceFetch(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            ApiError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "message": "Failed to generate mockups",
                    "error": detail,
                })),
            )
                .into_response(),
        }
    }
}

/// `POST /api/mockups`
pub async fn generate_mockups(
    State(state): State<AppState>,
    payload: Result<Json<GenerateMockupsRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();

    let response = match handle_generate(&state, payload).await {
        Ok(success) => (StatusCode::OK, Json(success)).into_response(),
        Err(err) => err.into_response(),
    };

    state.metrics.record_request(response.status().as_u16());
    if response.status() == StatusCode::OK {
        state
            .metrics
            .record_batch_duration(started.elapsed().as_micros() as u64);
    }

    response
}

async fn handle_generate(
    state: &AppState,
    payload: Result<Json<GenerateMockupsRequest>, JsonRejection>,
) -> Result<GenerateMockupsResponse, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))?;

    let (source_url, products) = validate_request(request)?;

    tracing::info!(
        result_image_url = %source_url,
        products = products.len(),
        "Generating mockups"
    );

    let outcome = state
        .generator
        .generate(&source_url, &products)
        .await
        .map_err(|e| match e {
            MockupError::SourceFetch(msg) => {
                ApiError::SourceFetch(format!("Failed to fetch result image: {}", msg))
            }
            other => ApiError::Internal(other.to_string()),
        })?;

    for skip in &outcome.skipped {
        state.metrics.record_skip(skip.reason.label());
    }

    let mut mockup_urls = Vec::with_capacity(outcome.mockups.len());
    for mockup in outcome.mockups {
        let public_id = Uuid::new_v4().to_string();

        match state
            .store
            .store(&mockup.image, &state.store_folder, &public_id)
            .await
        {
            Ok(url) => {
                state.metrics.record_store_upload();
                tracing::info!(
                    product_id = %mockup.product_id,
                    product_name = %mockup.product_name,
                    mockup_url = %url,
                    "Stored mockup"
                );
                mockup_urls.push(MockupUrl {
                    product_id: mockup.product_id,
                    product_name: mockup.product_name,
                    mockup_image_url: url,
                });
            }
            Err(e) => {
                state.metrics.record_store_failure();
                tracing::warn!(
                    product_id = %mockup.product_id,
                    product_name = %mockup.product_name,
                    error = %e,
                    "Failed to store mockup, skipping product"
                );
            }
        }
    }

    state.metrics.record_mockups(mockup_urls.len() as u64);

    Ok(GenerateMockupsResponse {
        message: "Mockups generated".to_string(),
        mockup_urls,
    })
}

fn validate_request(
    request: GenerateMockupsRequest,
) -> Result<(String, Vec<ProductRequest>), ApiError> {
    let source_url = match request.result_image_url {
        Some(url) if !url.trim().is_empty() => url,
        _ => return Err(ApiError::Validation("resultImageUrl is required".to_string())),
    };

    if !source_url.starts_with("http://") && !source_url.starts_with("https://") {
        return Err(ApiError::Validation(format!(
            "resultImageUrl must be an http(s) URL, got: {}",
            source_url
        )));
    }

    let products = request
        .products
        .ok_or_else(|| ApiError::Validation("products is required".to_string()))?;

    let products = products
        .into_iter()
        .map(|p| ProductRequest {
            id: p.id,
            name: p.name,
            base_image_url: p.base_image_url,
        })
        .collect();

    Ok((source_url, products))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Response {
    let body = serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    });

    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /metrics`
pub async fn export_metrics(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.export_prometheus(),
    )
        .into_response()
}
