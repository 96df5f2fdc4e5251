//! Diesel-based classification repository for SQLite.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::pool::{AsyncSqlitePool, DieselError};
use super::records::{ClassificationRecord, NewClassification};
use crate::models::Classification;
use crate::schema::classifications;

/// Classification repository with compile-time query checking.
#[derive(Clone)]
pub struct DieselClassificationRepository {
    pool: AsyncSqlitePool,
}

impl DieselClassificationRepository {
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Save a classification (insert or update using REPLACE INTO).
    pub async fn save(&self, classification: &Classification) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        let image_path = classification.image_path.display().to_string();
        let created_at = classification.created_at.to_rfc3339();
        let updated_at = classification.updated_at.to_rfc3339();

        let record = NewClassification {
            id: &classification.id,
            state: classification.state.code(),
            image_path: &image_path,
            image_mime: &classification.image_mime,
            image_size: classification.image_size as i64,
            predicted_category: classification.predicted_category.map(|c| c.as_str()),
            confidence_score: classification.confidence_score,
            waste_description: classification.waste_description.as_deref(),
            disposal_instructions: classification.disposal_instructions.as_deref(),
            state_specific_laws: classification.state_specific_laws.as_deref(),
            authorized_facilities: classification.authorized_facilities.as_deref(),
            health_hazards: classification.health_hazards.as_deref(),
            environmental_risks: classification.environmental_risks.as_deref(),
            precautions: classification.precautions.as_deref(),
            protective_equipment: classification.protective_equipment.as_deref(),
            emergency_procedures: classification.emergency_procedures.as_deref(),
            recyclability_info: classification.recyclability_info.as_deref(),
            cost_implications: classification.cost_implications.as_deref(),
            raw_response: classification.raw_response.as_deref(),
            created_at: &created_at,
            updated_at: &updated_at,
        };

        diesel::replace_into(classifications::table)
            .values(&record)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Get a classification by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Classification>, DieselError> {
        let mut conn = self.pool.get().await?;

        classifications::table
            .find(id)
            .first::<ClassificationRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Classification::from))
    }

    /// Get all classifications, newest first.
    pub async fn get_all(&self) -> Result<Vec<Classification>, DieselError> {
        let mut conn = self.pool.get().await?;

        classifications::table
            .order(classifications::created_at.desc())
            .load::<ClassificationRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(Classification::from).collect())
    }

    /// Get the most recent classifications.
    pub async fn recent(&self, limit: usize) -> Result<Vec<Classification>, DieselError> {
        let mut conn = self.pool.get().await?;

        classifications::table
            .order(classifications::created_at.desc())
            .limit(limit as i64)
            .load::<ClassificationRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(Classification::from).collect())
    }

    /// Count all classifications.
    pub async fn count(&self) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = classifications::table
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count.max(0) as u64)
    }

    /// Delete a classification.
    #[allow(dead_code)]
    pub async fn delete(&self, id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(classifications::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    use crate::models::{IndianState, WasteCategory};
    use crate::repository::DbContext;

    async fn setup_test_repo() -> (DieselClassificationRepository, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();
        (ctx.classifications(), dir)
    }

    fn sample(state: IndianState) -> Classification {
        Classification::new(
            state,
            PathBuf::from("ab/abcdef1234567890.jpg"),
            "image/jpeg".to_string(),
            4096,
        )
    }

    #[tokio::test]
    async fn test_classification_crud() {
        let (repo, _dir) = setup_test_repo().await;

        let pending = sample(IndianState::Maharashtra);
        repo.save(&pending).await.unwrap();

        let fetched = repo.get(&pending.id).await.unwrap().unwrap();
        assert!(fetched.is_pending());
        assert_eq!(fetched.state, IndianState::Maharashtra);
        assert_eq!(fetched.image_mime, "image/jpeg");
        assert_eq!(fetched.image_size, 4096);

        assert_eq!(repo.count().await.unwrap(), 1);

        assert!(repo.delete(&pending.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.get(&pending.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let (repo, _dir) = setup_test_repo().await;

        let mut c = sample(IndianState::Karnataka);
        repo.save(&c).await.unwrap();

        c.predicted_category = Some(WasteCategory::EWaste);
        c.confidence_score = Some(0.92);
        c.waste_description = Some("Discarded circuit board".to_string());
        c.raw_response = Some("{\"waste_classification\":{}}".to_string());
        repo.save(&c).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let fetched = repo.get(&c.id).await.unwrap().unwrap();
        assert!(!fetched.is_pending());
        assert_eq!(fetched.predicted_category, Some(WasteCategory::EWaste));
        assert_eq!(fetched.confidence_score, Some(0.92));
        assert_eq!(
            fetched.waste_description.as_deref(),
            Some("Discarded circuit board")
        );
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() {
        let (repo, _dir) = setup_test_repo().await;

        let mut older = sample(IndianState::Goa);
        older.created_at = older.created_at - chrono::Duration::minutes(5);
        let newer = sample(IndianState::Punjab);

        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);

        let recent = repo.recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, newer.id);
    }
}
