//! Waste analysis orchestration.
//!
//! The analyzer ties the pipeline together: validate the upload, persist the
//! image, create the pending row, consult the vision API, parse and validate
//! its reply, and save the completed classification. When the API call or
//! parsing fails the pending row remains; nothing is retried.

use chrono::Utc;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

use crate::gemini::{extract_json, AnalysisReport, GeminiClient, GeminiError};
use crate::models::{Classification, IndianState};
use crate::repository::{DieselClassificationRepository, DieselError};
use crate::storage::{self, UploadError};

/// Errors surfaced by an analysis request.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("{0}")]
    Validation(#[from] UploadError),
    #[error("Invalid state code: {0:?}")]
    UnknownState(String),
    #[error(transparent)]
    Gemini(#[from] GeminiError),
    #[error("database error: {0}")]
    Database(#[from] DieselError),
    #[error("failed to store image: {0}")]
    Storage(#[from] std::io::Error),
}

impl AnalyzeError {
    /// Whether the failure is the caller's fault (HTTP 400) rather than a
    /// server-side one (HTTP 500).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownState(_))
    }
}

/// Orchestrates a single upload-and-analyze request.
pub struct WasteAnalyzer {
    repo: DieselClassificationRepository,
    client: GeminiClient,
    media_dir: PathBuf,
}

impl WasteAnalyzer {
    pub fn new(
        repo: DieselClassificationRepository,
        client: GeminiClient,
        media_dir: PathBuf,
    ) -> Self {
        Self {
            repo,
            client,
            media_dir,
        }
    }

    /// Parse a state code and run the analysis.
    pub async fn analyze_with_code(
        &self,
        data: &[u8],
        filename: Option<&str>,
        state_code: &str,
    ) -> Result<Classification, AnalyzeError> {
        let state = IndianState::from_code(state_code)
            .ok_or_else(|| AnalyzeError::UnknownState(state_code.to_string()))?;
        self.analyze(data, filename, state).await
    }

    /// Run the full analysis pipeline for an uploaded image.
    pub async fn analyze(
        &self,
        data: &[u8],
        filename: Option<&str>,
        state: IndianState,
    ) -> Result<Classification, AnalyzeError> {
        let image = storage::validate_image(data, filename)?;
        let relative = storage::store_image(&self.media_dir, &image)?;

        let mut classification = Classification::new(
            state,
            relative,
            image.mime_type.to_string(),
            image.data.len() as u64,
        );
        self.repo.save(&classification).await?;
        info!(
            id = %classification.id,
            state = state.code(),
            "created pending classification"
        );

        let raw = match self
            .client
            .analyze_image(image.data, image.mime_type, state)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(id = %classification.id, error = %e, "vision API call failed");
                return Err(e.into());
            }
        };

        let value = extract_json(&raw)?;
        let report = AnalysisReport::from_value(value)?;
        apply_report(&mut classification, &report, &raw);
        self.repo.save(&classification).await?;

        info!(
            id = %classification.id,
            category = classification
                .predicted_category
                .map(|c| c.as_str())
                .unwrap_or(""),
            "analysis complete"
        );
        Ok(classification)
    }
}

/// Copy the parsed report fields onto the classification row.
fn apply_report(classification: &mut Classification, report: &AnalysisReport, raw: &str) {
    classification.predicted_category = Some(report.category());
    classification.confidence_score = Some(report.waste_classification.confidence);
    classification.waste_description = non_empty(&report.waste_classification.description);

    classification.disposal_instructions = non_empty(&report.disposal_instructions.general_method);
    classification.state_specific_laws =
        non_empty(&report.disposal_instructions.state_specific_laws);
    classification.authorized_facilities =
        non_empty(&report.disposal_instructions.authorized_facilities);

    classification.health_hazards = non_empty(&report.risk_assessment.health_hazards);
    classification.environmental_risks = non_empty(&report.risk_assessment.environmental_risks);

    classification.precautions = non_empty(&report.safety_measures.precautions);
    classification.protective_equipment = non_empty(&report.safety_measures.protective_equipment);
    classification.emergency_procedures = non_empty(&report.safety_measures.emergency_procedures);

    classification.recyclability_info = non_empty(&report.additional_info.recyclability);
    classification.cost_implications = non_empty(&report.additional_info.cost_implications);

    classification.raw_response = Some(raw.to_string());
    classification.updated_at = Utc::now();
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use crate::gemini::GeminiConfig;
    use crate::models::WasteCategory;
    use crate::repository::DbContext;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

    const RAW: &str = r#"```json
{
    "waste_classification": {"category": "HAZARDOUS", "confidence": 0.77, "description": "Used paint cans"},
    "disposal_instructions": {"general_method": "Take to a collection center", "state_specific_laws": "", "authorized_facilities": "District hazardous waste facility"},
    "risk_assessment": {"health_hazards": "Solvent fumes", "environmental_risks": "Soil contamination"},
    "safety_measures": {"precautions": "Keep sealed", "protective_equipment": "Nitrile gloves", "emergency_procedures": "Ventilate the area"},
    "additional_info": {"recyclability": "Metal body recyclable once empty", "cost_implications": "Drop-off is free"}
}
```"#;

    async fn setup(dir: &std::path::Path) -> WasteAnalyzer {
        let ctx = DbContext::new(&dir.join("test.db"));
        ctx.init_schema().await.unwrap();
        WasteAnalyzer::new(
            ctx.classifications(),
            GeminiClient::new(GeminiConfig::default()),
            dir.join("media"),
        )
    }

    #[test]
    fn test_apply_report_maps_all_fields() {
        let mut classification = Classification::new(
            IndianState::Gujarat,
            PathBuf::from("aa/aabbccdd00112233.png"),
            "image/png".to_string(),
            12,
        );
        let report = AnalysisReport::from_value(extract_json(RAW).unwrap()).unwrap();
        apply_report(&mut classification, &report, RAW);

        assert_eq!(
            classification.predicted_category,
            Some(WasteCategory::Hazardous)
        );
        assert_eq!(classification.confidence_score, Some(0.77));
        assert_eq!(
            classification.waste_description.as_deref(),
            Some("Used paint cans")
        );
        // Empty strings from the report become None, not Some("").
        assert!(classification.state_specific_laws.is_none());
        assert_eq!(
            classification.protective_equipment.as_deref(),
            Some("Nitrile gloves")
        );
        assert_eq!(classification.raw_response.as_deref(), Some(RAW));
        assert!(classification.updated_at >= classification.created_at);
    }

    #[tokio::test]
    async fn test_unknown_state_rejected_before_any_write() {
        let dir = tempdir().unwrap();
        let analyzer = setup(dir.path()).await;

        let err = analyzer
            .analyze_with_code(PNG, Some("waste.png"), "ZZ")
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let ctx = DbContext::new(&dir.path().join("test.db"));
        assert_eq!(ctx.classifications().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_upload_rejected() {
        let dir = tempdir().unwrap();
        let analyzer = setup(dir.path()).await;

        let err = analyzer
            .analyze(b"definitely not an image", None, IndianState::Bihar)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_failed_api_call_leaves_pending_row() {
        let dir = tempdir().unwrap();
        // No API key configured, so the vision call fails after the row and
        // image have been persisted.
        let analyzer = setup(dir.path()).await;

        let err = analyzer
            .analyze(PNG, Some("waste.png"), IndianState::TamilNadu)
            .await
            .unwrap_err();
        assert!(!err.is_validation());

        let ctx = DbContext::new(&dir.path().join("test.db"));
        let rows = ctx.classifications().get_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_pending());
        assert!(dir.path().join("media").join(&rows[0].image_path).exists());
    }
}
