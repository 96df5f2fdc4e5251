//! API endpoint handlers.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::super::AppState;
use super::helpers::{classification_json, read_analyze_form};
use crate::models::{IndianState, WasteCategory};

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Parameters for the classification listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

/// API usage description, served on GET so the endpoint is discoverable.
pub async fn api_analyze_info() -> impl IntoResponse {
    let states: serde_json::Map<String, serde_json::Value> = IndianState::ALL
        .iter()
        .map(|s| (s.code().to_string(), json!(s.name())))
        .collect();

    let categories: Vec<_> = WasteCategory::ALL
        .iter()
        .map(|c| json!({"code": c.as_str(), "name": c.display_name()}))
        .collect();

    Json(json!({
        "message": "Waste Analysis API - POST an image and state to analyze waste",
        "endpoint": "/api/analyze",
        "method": "POST",
        "required_fields": {
            "image": "Image file (jpg, png, webp, bmp) - Max 10MB",
            "state": "Indian state code"
        },
        "available_states": states,
        "waste_categories": categories,
        "example_curl": "curl -X POST http://127.0.0.1:8000/api/analyze -F \"image=@/path/to/image.jpg\" -F \"state=MH\"",
    }))
}

/// Analyze an uploaded waste image.
pub async fn api_analyze(State(state): State<AppState>, multipart: Multipart) -> impl IntoResponse {
    let form = match read_analyze_form(multipart).await {
        Ok(form) => form,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "error": message})),
            );
        }
    };

    let mut errors = serde_json::Map::new();
    if form.image.is_none() {
        errors.insert("image".to_string(), json!(["This field is required."]));
    }
    match &form.state {
        Some(code) if !code.is_empty() => {}
        _ => {
            errors.insert("state".to_string(), json!(["This field is required."]));
        }
    }
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "errors": errors})),
        );
    }

    // Both unwraps guarded by the checks above.
    let image = form.image.unwrap();
    let state_code = form.state.unwrap();

    match state
        .analyzer
        .analyze_with_code(&image.data, image.filename.as_deref(), &state_code)
        .await
    {
        Ok(classification) => (
            StatusCode::OK,
            Json(json!({"success": true, "data": classification_json(&classification)})),
        ),
        Err(e) if e.is_validation() => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": e.to_string()})),
        ),
        Err(e) => {
            error!(error = %e, "waste analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": format!("Analysis failed: {}", e)})),
            )
        }
    }
}

/// List stored classifications, newest first.
pub async fn api_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let result = match params.limit {
        Some(limit) => state.repo.recent(limit).await,
        None => state.repo.get_all().await,
    };

    match result {
        Ok(classifications) => {
            let items: Vec<_> = classifications.iter().map(classification_json).collect();
            Json(json!(items)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "error": e.to_string()})),
        )
            .into_response(),
    }
}

/// Fetch one classification.
pub async fn api_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.repo.get(&id).await {
        Ok(Some(classification)) => (
            StatusCode::OK,
            Json(json!({"success": true, "data": classification_json(&classification)})),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "error": "Classification not found"})),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "error": e.to_string()})),
        ),
    }
}
