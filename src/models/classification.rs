//! Waste classification models.
//!
//! One `Classification` row is created per analysis request. The row starts
//! out pending (image and state only) and is filled in once by the analyzer
//! after the vision API responds.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use super::IndianState;

/// Waste category assigned by the vision model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteCategory {
    Medical,
    EWaste,
    General,
    Recyclable,
    NonRecyclable,
    Hazardous,
    Organic,
}

impl WasteCategory {
    /// All categories, in display order.
    pub const ALL: [WasteCategory; 7] = [
        Self::Medical,
        Self::EWaste,
        Self::General,
        Self::Recyclable,
        Self::NonRecyclable,
        Self::Hazardous,
        Self::Organic,
    ];

    /// Stable wire code used in the API, prompt, and database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medical => "MEDICAL",
            Self::EWaste => "E_WASTE",
            Self::General => "GENERAL",
            Self::Recyclable => "RECYCLABLE",
            Self::NonRecyclable => "NON_RECYCLABLE",
            Self::Hazardous => "HAZARDOUS",
            Self::Organic => "ORGANIC",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "MEDICAL" => Some(Self::Medical),
            "E_WASTE" => Some(Self::EWaste),
            "GENERAL" => Some(Self::General),
            "RECYCLABLE" => Some(Self::Recyclable),
            "NON_RECYCLABLE" => Some(Self::NonRecyclable),
            "HAZARDOUS" => Some(Self::Hazardous),
            "ORGANIC" => Some(Self::Organic),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Medical => "Medical Waste",
            Self::EWaste => "E-Waste",
            Self::General => "General Waste",
            Self::Recyclable => "Recyclable Waste",
            Self::NonRecyclable => "Non-Recyclable Waste",
            Self::Hazardous => "Hazardous Waste",
            Self::Organic => "Organic Waste",
        }
    }
}

/// A waste analysis request and its result.
///
/// Analysis fields are `None` until the vision API has been consulted; a
/// classification without a predicted category is still pending.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Unique identifier for this classification.
    pub id: String,
    /// State the waste will be disposed in.
    pub state: IndianState,
    /// Path of the stored image, relative to the media directory.
    pub image_path: PathBuf,
    /// Sniffed MIME type of the uploaded image.
    pub image_mime: String,
    /// Uploaded image size in bytes.
    pub image_size: u64,

    // Classification result
    pub predicted_category: Option<WasteCategory>,
    pub confidence_score: Option<f64>,
    pub waste_description: Option<String>,

    // Disposal guidance
    pub disposal_instructions: Option<String>,
    pub state_specific_laws: Option<String>,
    pub authorized_facilities: Option<String>,

    // Risk assessment
    pub health_hazards: Option<String>,
    pub environmental_risks: Option<String>,

    // Safety measures
    pub precautions: Option<String>,
    pub protective_equipment: Option<String>,
    pub emergency_procedures: Option<String>,

    // Additional guidance
    pub recyclability_info: Option<String>,
    pub cost_implications: Option<String>,

    /// Raw vision API response text, kept for diagnostics.
    pub raw_response: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Classification {
    /// Create a pending classification for a freshly stored upload.
    pub fn new(
        state: IndianState,
        image_path: PathBuf,
        image_mime: String,
        image_size: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state,
            image_path,
            image_mime,
            image_size,
            predicted_category: None,
            confidence_score: None,
            waste_description: None,
            disposal_instructions: None,
            state_specific_laws: None,
            authorized_facilities: None,
            health_hazards: None,
            environmental_risks: None,
            precautions: None,
            protective_equipment: None,
            emergency_procedures: None,
            recyclability_info: None,
            cost_implications: None,
            raw_response: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the analysis has not completed yet.
    pub fn is_pending(&self) -> bool {
        self.predicted_category.is_none()
    }

    /// Confidence as a percentage rounded to two decimals, if analyzed.
    pub fn confidence_percent(&self) -> Option<f64> {
        self.confidence_score
            .map(|score| (score * 10_000.0).round() / 100.0)
    }

    /// Short report identifier shown on rendered reports.
    pub fn report_id(&self) -> String {
        let short: String = self.id.chars().filter(|c| *c != '-').take(8).collect();
        format!("WR-{}", short.to_ascii_uppercase())
    }
}
