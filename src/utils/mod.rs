//! Shared helpers.

mod html;

pub use html::html_escape;

/// Format a confidence score as a percentage with two decimals.
///
/// Unanalyzed rows render as 0, matching how they are stored.
pub fn format_confidence(score: Option<f64>) -> String {
    format!("{:.2}%", score.unwrap_or(0.0) * 100.0)
}
