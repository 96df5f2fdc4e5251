//! Gemini vision client for waste analysis.
//!
//! Sends the analysis prompt plus the uploaded image (inline, base64) to the
//! `generateContent` endpoint and returns the model's text reply. All
//! classification intelligence lives on the other side of this call.

mod config;
mod prompts;
mod response;

use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use config::GeminiConfig;
pub use response::{extract_json, AnalysisReport};

use crate::models::IndianState;

/// Errors that can occur while talking to the vision API.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Gemini API key is not configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("connection error: {0}")]
    Connection(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("no response received from Gemini API")]
    EmptyResponse,
    #[error("failed to parse API response as JSON: {0}")]
    Parse(String),
    #[error("invalid response structure from Gemini API: {0}")]
    Structure(String),
}

/// Gemini API request format.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the Gemini vision API.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Build the analysis prompt for a state.
    fn analysis_prompt(&self, state: IndianState) -> String {
        self.config
            .analysis_prompt()
            .replace("{state_name}", state.name())
            .replace("{state_code}", state.code())
    }

    /// Analyze a waste image, returning the model's raw text reply.
    pub async fn analyze_image(
        &self,
        image: &[u8],
        mime_type: &str,
        state: IndianState,
    ) -> Result<String, GeminiError> {
        debug!(
            state = state.code(),
            bytes = image.len(),
            "requesting waste analysis"
        );

        let parts = vec![
            RequestPart::Text {
                text: self.analysis_prompt(state),
            },
            RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.to_string(),
                    data: base64::engine::general_purpose::STANDARD.encode(image),
                },
            },
        ];

        self.generate(parts).await
    }

    /// Test the API connection with a text-only prompt.
    pub async fn test_connection(&self) -> Result<String, GeminiError> {
        let parts = vec![RequestPart::Text {
            text: prompts::CONNECTION_TEST_PROMPT.to_string(),
        }];
        self.generate(parts).await
    }

    /// Call the generateContent endpoint with the given parts.
    async fn generate(&self, parts: Vec<RequestPart>) -> Result<String, GeminiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GeminiError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![RequestContent { parts }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api(format!("HTTP {}: {}", status, body)));
        }

        let generated: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let text = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_substitutes_state() {
        let client = GeminiClient::new(GeminiConfig::default());
        let prompt = client.analysis_prompt(IndianState::Maharashtra);
        assert!(prompt.contains("Maharashtra (MH)"));
        assert!(!prompt.contains("{state_name}"));
        assert!(!prompt.contains("{state_code}"));
    }

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text {
                        text: "describe".to_string(),
                    },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png".to_string(),
                            data: "AAAA".to_string(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 2048,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "describe");
        assert_eq!(
            value["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.model.contains("gemini"));
        assert!(config.analysis_prompt.is_none());
        assert!(config.analysis_prompt().contains("{state_name}"));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_typed_error() {
        let client = GeminiClient::new(GeminiConfig::default());
        let err = client
            .analyze_image(b"not an image", "image/jpeg", IndianState::Kerala)
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::MissingApiKey));
    }
}
