use std::sync::Arc;

use storage::repository::{FlashcardRepository, StorageError, StudySetRepository};
use study_core::model::{Flashcard, FlashcardId, StudySetId, UserId};
use tracing::info;

use crate::error::FlashcardServiceError;

/// Edits the cards of a study set. Every mutation is checked against the
/// set's owner.
#[derive(Clone)]
pub struct FlashcardService {
    study_sets: Arc<dyn StudySetRepository>,
    flashcards: Arc<dyn FlashcardRepository>,
}

impl FlashcardService {
    #[must_use]
    pub fn new(
        study_sets: Arc<dyn StudySetRepository>,
        flashcards: Arc<dyn FlashcardRepository>,
    ) -> Self {
        Self {
            study_sets,
            flashcards,
        }
    }

    /// Append a card to the end of the set.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::StudySetNotFound` if the set is missing
    /// and `Forbidden` if `actor` does not own it.
    pub async fn create(
        &self,
        actor: UserId,
        study_set_id: StudySetId,
        term: &str,
        definition: &str,
    ) -> Result<Flashcard, FlashcardServiceError> {
        self.ensure_owner(actor, study_set_id).await?;
        let card = self
            .flashcards
            .append_flashcard(study_set_id, term, definition)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => FlashcardServiceError::StudySetNotFound,
                other => FlashcardServiceError::Storage(other),
            })?;
        info!(
            study_set = %study_set_id,
            flashcard = %card.id(),
            position = card.position(),
            "created flashcard"
        );
        Ok(card)
    }

    /// Replace a card's term and definition. Position is kept.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::NotFound` if the card is not in the set,
    /// `StudySetNotFound` if the set is missing and `Forbidden` for non-owners.
    pub async fn update(
        &self,
        actor: UserId,
        study_set_id: StudySetId,
        id: FlashcardId,
        term: &str,
        definition: &str,
    ) -> Result<Flashcard, FlashcardServiceError> {
        self.ensure_owner(actor, study_set_id).await?;
        let existing = self
            .flashcards
            .list_flashcards(study_set_id)
            .await?
            .into_iter()
            .find(|card| card.id() == id)
            .ok_or(FlashcardServiceError::NotFound)?;

        let updated = existing.with_text(term, definition);
        self.flashcards
            .update_flashcard(&updated)
            .await
            .map_err(card_not_found)?;
        info!(study_set = %study_set_id, flashcard = %id, "updated flashcard");
        Ok(updated)
    }

    /// Remove a card from the set.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::NotFound` if the card is not in the set,
    /// `StudySetNotFound` if the set is missing and `Forbidden` for non-owners.
    pub async fn delete(
        &self,
        actor: UserId,
        study_set_id: StudySetId,
        id: FlashcardId,
    ) -> Result<(), FlashcardServiceError> {
        self.ensure_owner(actor, study_set_id).await?;
        self.flashcards
            .delete_flashcard(study_set_id, id)
            .await
            .map_err(card_not_found)?;
        info!(study_set = %study_set_id, flashcard = %id, "deleted flashcard");
        Ok(())
    }

    /// Cards of a set in study order. Anyone may read them.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::Storage` if repository access fails.
    pub async fn list(
        &self,
        study_set_id: StudySetId,
    ) -> Result<Vec<Flashcard>, FlashcardServiceError> {
        Ok(self.flashcards.list_flashcards(study_set_id).await?)
    }

    async fn ensure_owner(
        &self,
        actor: UserId,
        study_set_id: StudySetId,
    ) -> Result<(), FlashcardServiceError> {
        let set = self
            .study_sets
            .get_study_set(study_set_id)
            .await?
            .ok_or(FlashcardServiceError::StudySetNotFound)?;
        if set.is_owned_by(Some(actor)) {
            Ok(())
        } else {
            Err(FlashcardServiceError::Forbidden)
        }
    }
}

fn card_not_found(err: StorageError) -> FlashcardServiceError {
    match err {
        StorageError::NotFound => FlashcardServiceError::NotFound,
        other => FlashcardServiceError::Storage(other),
    }
}
