//! Extraction and validation of analysis responses.
//!
//! The prompt demands bare JSON, but the model regularly wraps its reply in
//! markdown code fences or pads it with prose. Extraction therefore walks a
//! chain of progressively looser strategies and fails closed only when none
//! of them yields a JSON object.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::GeminiError;
use crate::models::WasteCategory;

fn fenced_json_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap())
}

fn brace_span_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").unwrap())
}

/// Strip one leading fence marker (optionally tagged `json`) and one
/// trailing fence marker.
fn strip_fence(s: &str) -> &str {
    let mut out = s;
    if let Some(rest) = out.strip_prefix("```json") {
        out = rest;
    } else if let Some(rest) = out.strip_prefix("```") {
        out = rest;
    }
    if let Some(rest) = out.trim_end().strip_suffix("```") {
        out = rest;
    }
    out.trim()
}

/// Extract a JSON value from a model response.
///
/// Strategies, in order:
/// 1. strip surrounding fence markers and parse the remainder;
/// 2. parse the span between the first ` ```json ` and the last ` ``` `;
/// 3. regex-search for a `json`-tagged fenced block;
/// 4. regex-search for the first `{...}` span.
pub fn extract_json(raw: &str) -> Result<Value, GeminiError> {
    let cleaned = raw.trim();

    if let Ok(value) = serde_json::from_str(strip_fence(cleaned)) {
        return Ok(value);
    }
    tracing::debug!("direct JSON parse failed, trying fence extraction");

    if let Some(start) = cleaned.find("```json") {
        let start = start + "```json".len();
        if let Some(end) = cleaned.rfind("```") {
            if start < end {
                if let Ok(value) = serde_json::from_str(cleaned[start..end].trim()) {
                    return Ok(value);
                }
            }
        }
    }

    if let Some(caps) = fenced_json_re().captures(cleaned) {
        if let Ok(value) = serde_json::from_str(caps[1].trim()) {
            return Ok(value);
        }
    }

    if let Some(m) = brace_span_re().find(cleaned) {
        if let Ok(value) = serde_json::from_str(m.as_str()) {
            return Ok(value);
        }
    }

    Err(GeminiError::Parse(
        "no valid JSON found in response; all extraction strategies failed".to_string(),
    ))
}

/// Structured analysis report as promised by the prompt.
///
/// All five sections are required; the free-text subfields tolerate being
/// absent and default to empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisReport {
    pub waste_classification: ClassificationSection,
    pub disposal_instructions: DisposalSection,
    pub risk_assessment: RiskSection,
    pub safety_measures: SafetySection,
    pub additional_info: AdditionalSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationSection {
    #[serde(default)]
    pub category: String,
    pub confidence: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisposalSection {
    #[serde(default)]
    pub general_method: String,
    #[serde(default)]
    pub state_specific_laws: String,
    #[serde(default)]
    pub authorized_facilities: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskSection {
    #[serde(default)]
    pub health_hazards: String,
    #[serde(default)]
    pub environmental_risks: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SafetySection {
    #[serde(default)]
    pub precautions: String,
    #[serde(default)]
    pub protective_equipment: String,
    #[serde(default)]
    pub emergency_procedures: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdditionalSection {
    #[serde(default)]
    pub recyclability: String,
    #[serde(default)]
    pub cost_implications: String,
}

impl AnalysisReport {
    /// Deserialize and validate an extracted JSON value.
    pub fn from_value(value: Value) -> Result<Self, GeminiError> {
        let report: AnalysisReport = serde_json::from_value(value)
            .map_err(|e| GeminiError::Structure(e.to_string()))?;

        let section = &report.waste_classification;
        if WasteCategory::from_str(&section.category).is_none() {
            return Err(GeminiError::Structure(format!(
                "invalid category: {:?}",
                section.category
            )));
        }
        if !(0.0..=1.0).contains(&section.confidence) || !section.confidence.is_finite() {
            return Err(GeminiError::Structure(format!(
                "invalid confidence score: {}",
                section.confidence
            )));
        }

        Ok(report)
    }

    /// Validated waste category.
    pub fn category(&self) -> WasteCategory {
        WasteCategory::from_str(&self.waste_classification.category)
            .unwrap_or(WasteCategory::General)
    }
}
