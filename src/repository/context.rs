//! Database context for schema setup and repository access.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::classification::DieselClassificationRepository;
use super::pool::{AsyncSqlitePool, DieselError};

/// Owns the connection factory and hands out repositories.
///
/// Create one context per command or service, then use it to access the
/// repositories it backs.
#[derive(Clone)]
pub struct DbContext {
    pool: AsyncSqlitePool,
}

impl DbContext {
    /// Create a context from a SQLite file path.
    pub fn new(db_path: &Path) -> Self {
        Self {
            pool: AsyncSqlitePool::from_path(db_path),
        }
    }

    /// Get a classification repository.
    pub fn classifications(&self) -> DieselClassificationRepository {
        DieselClassificationRepository::new(self.pool.clone())
    }

    /// Initialize the database schema. Idempotent.
    pub async fn init_schema(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        conn.batch_execute(
            r#"
            CREATE TABLE IF NOT EXISTS classifications (
                id TEXT PRIMARY KEY,
                state TEXT NOT NULL,
                image_path TEXT NOT NULL,
                image_mime TEXT NOT NULL,
                image_size INTEGER NOT NULL DEFAULT 0,
                predicted_category TEXT,
                confidence_score REAL,
                waste_description TEXT,
                disposal_instructions TEXT,
                state_specific_laws TEXT,
                authorized_facilities TEXT,
                health_hazards TEXT,
                environmental_risks TEXT,
                precautions TEXT,
                protective_equipment TEXT,
                emergency_procedures TEXT,
                recyclability_info TEXT,
                cost_implications TEXT,
                raw_response TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_classifications_created_at
                ON classifications(created_at);
            "#,
        )
        .await?;

        Ok(())
    }
}
