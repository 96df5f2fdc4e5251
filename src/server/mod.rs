//! Web server for the waste classification service.
//!
//! Serves the upload/history pages, the JSON API, PDF downloads, and stored
//! media. Each request is handled independently; the vision API call blocks
//! its own request task and nothing is shared beyond the repository handles.

mod assets;
mod handlers;
mod routes;
mod templates;

pub use routes::create_router;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::gemini::GeminiClient;
use crate::repository::{DbContext, DieselClassificationRepository};
use crate::services::WasteAnalyzer;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<DieselClassificationRepository>,
    pub analyzer: Arc<WasteAnalyzer>,
    pub media_dir: PathBuf,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let ctx = DbContext::new(&settings.database_path);
        let client = GeminiClient::new(settings.gemini.clone());
        let analyzer = WasteAnalyzer::new(
            ctx.classifications(),
            client,
            settings.media_dir.clone(),
        );

        Self {
            repo: Arc::new(ctx.classifications()),
            analyzer: Arc::new(analyzer),
            media_dir: settings.media_dir.clone(),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    std::fs::create_dir_all(&settings.media_dir)?;

    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::gemini::GeminiConfig;
    use crate::models::{Classification, IndianState, WasteCategory};

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

    fn test_state(dir: &std::path::Path) -> AppState {
        let ctx = DbContext::new(&dir.join("test.db"));
        let media_dir = dir.join("media");
        std::fs::create_dir_all(&media_dir).unwrap();

        let analyzer = WasteAnalyzer::new(
            ctx.classifications(),
            GeminiClient::new(GeminiConfig::default()),
            media_dir.clone(),
        );

        AppState {
            repo: Arc::new(ctx.classifications()),
            analyzer: Arc::new(analyzer),
            media_dir,
        }
    }

    async fn setup_test_app() -> (axum::Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();

        let state = test_state(dir.path());
        (create_router(state), dir)
    }

    async fn setup_test_app_with_data() -> (axum::Router, String, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();

        let mut c = Classification::new(
            IndianState::Maharashtra,
            std::path::PathBuf::from("ab/abcdef1234567890.png"),
            "image/png".to_string(),
            PNG.len() as u64,
        );
        c.predicted_category = Some(WasteCategory::Recyclable);
        c.confidence_score = Some(0.85);
        c.waste_description = Some("Crushed PET bottles".to_string());
        c.disposal_instructions = Some("Deliver to a dry waste collection center.".to_string());
        ctx.classifications().save(&c).await.unwrap();

        let media_file = dir.path().join("media").join("ab");
        std::fs::create_dir_all(&media_file).unwrap();
        std::fs::write(media_file.join("abcdef1234567890.png"), PNG).unwrap();

        let state = test_state(dir.path());
        (create_router(state), c.id, dir)
    }

    fn multipart_request(uri: &str, fields: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let boundary = "ecowaste-test-boundary";
        let mut body: Vec<u8> = Vec::new();

        for (name, filename, data) in fields {
            body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home_page() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("EcoWaste"));
    }

    #[tokio::test]
    async fn test_analyze_form_page() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/analyze")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("multipart/form-data"));
        assert!(html.contains("Maharashtra"));
    }

    #[tokio::test]
    async fn test_history_page() {
        let (app, _id, _dir) = setup_test_app_with_data().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Recyclable Waste"));
    }

    #[tokio::test]
    async fn test_results_page_with_data() {
        let (app, id, _dir) = setup_test_app_with_data().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(&format!("/results/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Crushed PET bottles"));
        assert!(html.contains("85.00%"));
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/detail/nonexistent-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Handler returns 200 with a "not found" HTML page.
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("not found"));
    }

    #[tokio::test]
    async fn test_form_submit_without_fields_rerenders_form() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(multipart_request("/analyze", &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("error-banner"));
        assert!(html.contains("Please provide both image and state."));
    }

    #[tokio::test]
    async fn test_api_analyze_info() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/analyze")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["available_states"].as_object().unwrap().len(), 37);
        assert_eq!(json["waste_categories"].as_array().unwrap().len(), 7);
        assert_eq!(json["available_states"]["MH"], "Maharashtra");
    }

    #[tokio::test]
    async fn test_api_analyze_missing_fields() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(multipart_request("/api/analyze", &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["errors"]["image"].is_array());
        assert!(json["errors"]["state"].is_array());
    }

    #[tokio::test]
    async fn test_api_analyze_unknown_state() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(multipart_request(
                "/api/analyze",
                &[
                    ("image", Some("waste.png"), PNG),
                    ("state", None, b"ZZ"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("state code"));
    }

    #[tokio::test]
    async fn test_api_analyze_rejects_non_image() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(multipart_request(
                "/api/analyze",
                &[
                    ("image", Some("note.txt"), b"plain text"),
                    ("state", None, b"MH"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_api_analyze_without_api_key_is_server_error() {
        let (app, _dir) = setup_test_app().await;

        // Valid upload, but the test client has no API key configured, so the
        // pipeline fails after creating the pending row.
        let response = app
            .oneshot(multipart_request(
                "/api/analyze",
                &[
                    ("image", Some("waste.png"), PNG),
                    ("state", None, b"MH"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("Analysis failed"));
    }

    #[tokio::test]
    async fn test_api_list_and_detail() {
        let (app, id, _dir) = setup_test_app_with_data().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/classifications")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["waste_category"], "RECYCLABLE");
        assert_eq!(json[0]["confidence_score"], 85.0);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(&format!("/api/classifications/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["state"], "MH");
        assert_eq!(
            json["data"]["image_url"],
            "/media/ab/abcdef1234567890.png"
        );
    }

    #[tokio::test]
    async fn test_api_detail_not_found() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/classifications/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_download_pdf() {
        let (app, id, _dir) = setup_test_app_with_data().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(&format!("/download/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        assert_eq!(content_type, "application/pdf");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_download_missing_is_404() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/download/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_media_serving_and_traversal_guard() {
        let (app, _id, _dir) = setup_test_app_with_data().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/media/ab/abcdef1234567890.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        assert!(content_type.contains("image/png"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/media/..%2Ftest.db")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_css() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/static/style.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap_or(""));
        assert!(content_type.unwrap_or("").contains("css"));
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
