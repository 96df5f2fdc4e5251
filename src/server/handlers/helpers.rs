//! Shared handler helpers.

use axum::body::Bytes;
use axum::extract::Multipart;
use serde_json::json;

use crate::models::Classification;

/// An uploaded file from a multipart form.
pub struct UploadedFile {
    pub filename: Option<String>,
    pub data: Bytes,
}

/// Fields of the analyze form, both present or not.
#[derive(Default)]
pub struct AnalyzeForm {
    pub image: Option<UploadedFile>,
    pub state: Option<String>,
}

/// Read the analyze form out of a multipart request.
///
/// Unknown fields are ignored. Errors are user-facing strings.
pub async fn read_analyze_form(mut multipart: Multipart) -> Result<AnalyzeForm, String> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Invalid multipart request: {}", e))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("image") => {
                let filename = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read uploaded image: {}", e))?;
                form.image = Some(UploadedFile { filename, data });
            }
            Some("state") => {
                form.state = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| format!("Failed to read state field: {}", e))?,
                );
            }
            _ => {}
        }
    }

    Ok(form)
}

/// JSON shape of a classification used by every API endpoint.
pub fn classification_json(c: &Classification) -> serde_json::Value {
    json!({
        "id": c.id,
        "waste_category": c.predicted_category.map(|cat| cat.as_str()),
        "category_display": c.predicted_category.map(|cat| cat.display_name()),
        "confidence_score": c.confidence_percent().unwrap_or(0.0),
        "state": c.state.code(),
        "state_display": c.state.name(),
        "waste_description": c.waste_description.as_deref().unwrap_or(""),
        "disposal_instructions": c.disposal_instructions.as_deref().unwrap_or(""),
        "state_specific_laws": c.state_specific_laws.as_deref().unwrap_or(""),
        "authorized_facilities": c.authorized_facilities.as_deref().unwrap_or(""),
        "health_hazards": c.health_hazards.as_deref().unwrap_or(""),
        "environmental_risks": c.environmental_risks.as_deref().unwrap_or(""),
        "precautions": c.precautions.as_deref().unwrap_or(""),
        "protective_equipment": c.protective_equipment.as_deref().unwrap_or(""),
        "emergency_procedures": c.emergency_procedures.as_deref().unwrap_or(""),
        "recyclability_info": c.recyclability_info.as_deref().unwrap_or(""),
        "cost_implications": c.cost_implications.as_deref().unwrap_or(""),
        "image_url": format!("/media/{}", c.image_path.display()),
        "created_at": c.created_at.to_rfc3339(),
        "updated_at": c.updated_at.to_rfc3339(),
    })
}
