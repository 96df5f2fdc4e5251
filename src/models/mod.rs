//! Data models for EcoWaste.

mod classification;
mod state;

pub use classification::{Classification, WasteCategory};
pub use state::IndianState;
