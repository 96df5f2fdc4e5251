//! Server-rendered page handlers.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::error;

use super::super::templates;
use super::super::AppState;
use super::helpers::read_analyze_form;
use crate::report;

/// Home page with recent classifications.
pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let total = state.repo.count().await.unwrap_or(0);
    let recent = state.repo.recent(6).await.unwrap_or_default();

    Html(templates::base_template(
        "Waste Classification",
        &templates::home_page(total, &recent),
    ))
}

/// Upload form.
pub async fn analyze_form() -> impl IntoResponse {
    Html(templates::base_template(
        "Analyze Waste",
        &templates::analyze_page(None),
    ))
}

/// Form submission path: analyze and redirect to the results page, or
/// re-render the form with the failure message.
pub async fn analyze_submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match read_analyze_form(multipart).await {
        Ok(form) => form,
        Err(message) => return form_error(&message),
    };

    let (image, state_code) = match (form.image, form.state) {
        (Some(image), Some(code)) if !code.is_empty() => (image, code),
        _ => return form_error("Please provide both image and state."),
    };

    match state
        .analyzer
        .analyze_with_code(&image.data, image.filename.as_deref(), &state_code)
        .await
    {
        Ok(classification) => {
            Redirect::to(&format!("/results/{}", classification.id)).into_response()
        }
        Err(e) => {
            if !e.is_validation() {
                error!(error = %e, "waste analysis failed");
            }
            form_error(&format!("Analysis failed: {}", e))
        }
    }
}

fn form_error(message: &str) -> Response {
    Html(templates::base_template(
        "Analyze Waste",
        &templates::analyze_page(Some(message)),
    ))
    .into_response()
}

/// Full history listing.
pub async fn history_page(State(state): State<AppState>) -> impl IntoResponse {
    match state.repo.get_all().await {
        Ok(classifications) => Html(templates::base_template(
            "Classification History",
            &templates::history_page(&classifications),
        )),
        Err(e) => Html(templates::base_template(
            "Error",
            &templates::error_page(&format!("Failed to load history: {}", e)),
        )),
    }
}

/// Post-analysis results page.
pub async fn results_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    render_classification(state, &id, "Analysis Results", templates::results_page).await
}

/// Stored-record detail page.
pub async fn detail_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    render_classification(state, &id, "Classification Detail", templates::detail_page).await
}

async fn render_classification(
    state: AppState,
    id: &str,
    title: &str,
    body: fn(&crate::models::Classification) -> String,
) -> Html<String> {
    match state.repo.get(id).await {
        Ok(Some(classification)) => {
            Html(templates::base_template(title, &body(&classification)))
        }
        Ok(None) => Html(templates::base_template(
            "Not Found",
            &templates::not_found_page(),
        )),
        Err(e) => Html(templates::base_template(
            "Error",
            &templates::error_page(&format!("Failed to load classification: {}", e)),
        )),
    }
}

/// PDF report download. Shared by the page route and the API route.
pub async fn download_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let classification = match state.repo.get(&id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, "Classification not found").into_response();
        }
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    match report::render(&classification) {
        Ok(bytes) => {
            let disposition = format!(
                "attachment; filename=\"waste_report_{}.pdf\"",
                classification.report_id()
            );
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, id = %classification.id, "PDF generation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
