//! Service layer orchestrating analysis requests.

mod analyzer;

pub use analyzer::{AnalyzeError, WasteAnalyzer};
