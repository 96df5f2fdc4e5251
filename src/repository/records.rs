//! Diesel ORM records for the classifications table.

use diesel::prelude::*;
use std::path::PathBuf;

use super::parse_datetime;
use crate::models::{Classification, IndianState, WasteCategory};
use crate::schema::classifications;

/// Classification row as stored in the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = classifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClassificationRecord {
    pub id: String,
    pub state: String,
    pub image_path: String,
    pub image_mime: String,
    pub image_size: i64,
    pub predicted_category: Option<String>,
    pub confidence_score: Option<f64>,
    pub waste_description: Option<String>,
    pub disposal_instructions: Option<String>,
    pub state_specific_laws: Option<String>,
    pub authorized_facilities: Option<String>,
    pub health_hazards: Option<String>,
    pub environmental_risks: Option<String>,
    pub precautions: Option<String>,
    pub protective_equipment: Option<String>,
    pub emergency_procedures: Option<String>,
    pub recyclability_info: Option<String>,
    pub cost_implications: Option<String>,
    pub raw_response: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// New classification row for insertion or replacement.
#[derive(Insertable, Debug)]
#[diesel(table_name = classifications)]
pub struct NewClassification<'a> {
    pub id: &'a str,
    pub state: &'a str,
    pub image_path: &'a str,
    pub image_mime: &'a str,
    pub image_size: i64,
    pub predicted_category: Option<&'a str>,
    pub confidence_score: Option<f64>,
    pub waste_description: Option<&'a str>,
    pub disposal_instructions: Option<&'a str>,
    pub state_specific_laws: Option<&'a str>,
    pub authorized_facilities: Option<&'a str>,
    pub health_hazards: Option<&'a str>,
    pub environmental_risks: Option<&'a str>,
    pub precautions: Option<&'a str>,
    pub protective_equipment: Option<&'a str>,
    pub emergency_procedures: Option<&'a str>,
    pub recyclability_info: Option<&'a str>,
    pub cost_implications: Option<&'a str>,
    pub raw_response: Option<&'a str>,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

impl From<ClassificationRecord> for Classification {
    fn from(record: ClassificationRecord) -> Self {
        Classification {
            state: IndianState::from_code(&record.state).unwrap_or(IndianState::Delhi),
            image_path: PathBuf::from(record.image_path),
            image_mime: record.image_mime,
            image_size: record.image_size.max(0) as u64,
            predicted_category: record
                .predicted_category
                .as_deref()
                .and_then(WasteCategory::from_str),
            confidence_score: record.confidence_score,
            waste_description: record.waste_description,
            disposal_instructions: record.disposal_instructions,
            state_specific_laws: record.state_specific_laws,
            authorized_facilities: record.authorized_facilities,
            health_hazards: record.health_hazards,
            environmental_risks: record.environmental_risks,
            precautions: record.precautions,
            protective_equipment: record.protective_equipment,
            emergency_procedures: record.emergency_procedures,
            recyclability_info: record.recyclability_info,
            cost_implications: record.cost_implications,
            raw_response: record.raw_response,
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
            id: record.id,
        }
    }
}
