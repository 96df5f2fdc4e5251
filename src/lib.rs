//! EcoWaste - AI-assisted waste classification and disposal guidance.
//!
//! Upload a photo of waste material plus an Indian state code; the service
//! sends the image to the Gemini vision API, stores the structured result,
//! and serves it back as HTML, JSON, or a PDF report.

pub mod cli;
pub mod config;
pub mod gemini;
pub mod models;
pub mod report;
pub mod repository;
pub mod schema;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;
