use study_core::model::{StudySet, StudySetId, UserId};

use super::SqliteRepository;
use super::mapping::{db_error, map_study_set_row};
use crate::repository::{StorageError, StudySetRepository};

#[async_trait::async_trait]
impl StudySetRepository for SqliteRepository {
    async fn upsert_study_set(&self, set: &StudySet) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO study_sets (id, owner_id, title, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description
            ",
        )
        .bind(set.id().to_string())
        .bind(set.owner_id().to_string())
        .bind(set.title())
        .bind(set.description())
        .bind(set.created_at())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn get_study_set(&self, id: StudySetId) -> Result<Option<StudySet>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, owner_id, title, description, created_at
            FROM study_sets
            WHERE id = ?1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(map_study_set_row).transpose()
    }

    async fn list_study_sets(
        &self,
        owner: UserId,
        limit: u32,
    ) -> Result<Vec<StudySet>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, owner_id, title, description, created_at
            FROM study_sets
            WHERE owner_id = ?1
            ORDER BY created_at DESC, id ASC
            LIMIT ?2
            ",
        )
        .bind(owner.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(map_study_set_row).collect()
    }

    async fn delete_study_set(&self, id: StudySetId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM study_sets WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
