use sqlx::Row;
use study_core::model::{Flashcard, FlashcardId, StudySetId};

use super::SqliteRepository;
use super::mapping::{
    db_error, flashcard_id_from_i64, flashcard_id_to_i64, map_flashcard_row, ser,
};
use crate::repository::{FlashcardRepository, StorageError};

#[async_trait::async_trait]
impl FlashcardRepository for SqliteRepository {
    async fn append_flashcard(
        &self,
        study_set_id: StudySetId,
        term: &str,
        definition: &str,
    ) -> Result<Flashcard, StorageError> {
        // Position is computed in the same statement so concurrent appends
        // cannot read the same maximum.
        let row = sqlx::query(
            r"
            INSERT INTO flashcards (study_set_id, term, definition, position)
            SELECT ?1, ?2, ?3, COALESCE(MAX(position) + 1, 0)
            FROM flashcards
            WHERE study_set_id = ?1
            RETURNING id, position
            ",
        )
        .bind(study_set_id.to_string())
        .bind(term)
        .bind(definition)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        let id = flashcard_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
        let position: i64 = row.try_get("position").map_err(ser)?;
        let position = u32::try_from(position)
            .map_err(|_| StorageError::Serialization(format!("invalid position: {position}")))?;

        Ok(Flashcard::new(id, study_set_id, term, definition, position))
    }

    async fn update_flashcard(&self, card: &Flashcard) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE flashcards
            SET term = ?1, definition = ?2
            WHERE id = ?3 AND study_set_id = ?4
            ",
        )
        .bind(card.term())
        .bind(card.definition())
        .bind(flashcard_id_to_i64(card.id())?)
        .bind(card.study_set_id().to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_flashcard(
        &self,
        study_set_id: StudySetId,
        id: FlashcardId,
    ) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM flashcards WHERE id = ?1 AND study_set_id = ?2")
            .bind(flashcard_id_to_i64(id)?)
            .bind(study_set_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list_flashcards(
        &self,
        study_set_id: StudySetId,
    ) -> Result<Vec<Flashcard>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, study_set_id, term, definition, position
            FROM flashcards
            WHERE study_set_id = ?1
            ORDER BY position ASC, id ASC
            ",
        )
        .bind(study_set_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(map_flashcard_row).collect()
    }
}
