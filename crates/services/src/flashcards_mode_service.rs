use std::sync::Arc;

use storage::repository::{FlashcardRepository, StudySetRepository};
use study_core::model::{StudySetId, UserId, sort_by_position};
use study_core::study::{SessionController, ToughReviewPolicy};
use tracing::{debug, info};

use crate::error::FlashcardsModeError;

/// Everything the flashcards page needs to start a game.
#[derive(Debug, Clone)]
pub struct FlashcardsGame {
    pub study_set_id: StudySetId,
    pub title: String,
    /// The viewer owns the set and may jump to the editor.
    pub editable: bool,
    pub controller: SessionController,
}

/// Loads a study set into a fresh study session.
#[derive(Clone)]
pub struct FlashcardsModeService {
    study_sets: Arc<dyn StudySetRepository>,
    flashcards: Arc<dyn FlashcardRepository>,
    tough_review_policy: ToughReviewPolicy,
}

impl FlashcardsModeService {
    #[must_use]
    pub fn new(
        study_sets: Arc<dyn StudySetRepository>,
        flashcards: Arc<dyn FlashcardRepository>,
    ) -> Self {
        Self {
            study_sets,
            flashcards,
            tough_review_policy: ToughReviewPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_tough_review_policy(mut self, policy: ToughReviewPolicy) -> Self {
        self.tough_review_policy = policy;
        self
    }

    /// Start a game over the set's cards in position order, sorting off.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardsModeError::NotFound` if the set does not exist.
    pub async fn start(
        &self,
        study_set_id: StudySetId,
        viewer: Option<UserId>,
    ) -> Result<FlashcardsGame, FlashcardsModeError> {
        let set = self
            .study_sets
            .get_study_set(study_set_id)
            .await?
            .ok_or(FlashcardsModeError::NotFound)?;

        let mut cards = self.flashcards.list_flashcards(study_set_id).await?;
        sort_by_position(&mut cards);
        debug!(study_set = %study_set_id, cards = cards.len(), "loaded deck");

        let controller =
            SessionController::new(cards).with_tough_review_policy(self.tough_review_policy);
        let editable = set.is_owned_by(viewer);
        info!(study_set = %study_set_id, editable, "started flashcards game");

        Ok(FlashcardsGame {
            study_set_id,
            title: set.title().to_owned(),
            editable,
            controller,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use storage::repository::{InMemoryRepository, UserRepository};
    use study_core::model::{Email, StudySet, User};
    use study_core::study::SessionStatus;
    use study_core::time::fixed_now;

    #[tokio::test]
    async fn start_loads_cards_and_capability() {
        let repo = InMemoryRepository::new();
        let owner = User::new(
            UserId::generate(),
            "Owner",
            Email::parse("mode@example.com").unwrap(),
            NaiveDate::from_ymd_opt(1999, 9, 9).unwrap(),
            None,
            "hash",
            fixed_now(),
        )
        .unwrap();
        repo.insert_user(&owner).await.unwrap();
        let set = StudySet::new(StudySetId::generate(), owner.id(), "Colors", None, fixed_now())
            .unwrap();
        repo.upsert_study_set(&set).await.unwrap();
        repo.append_flashcard(set.id(), "rojo", "red").await.unwrap();
        repo.append_flashcard(set.id(), "azul", "blue").await.unwrap();

        let service = FlashcardsModeService::new(Arc::new(repo.clone()), Arc::new(repo));

        let game = service.start(set.id(), Some(owner.id())).await.unwrap();
        assert_eq!(game.title, "Colors");
        assert!(game.editable);
        assert_eq!(game.controller.deck().len(), 2);
        assert_eq!(game.controller.current_card().unwrap().term(), "rojo");
        assert!(!game.controller.sorting_enabled());

        let anonymous = service.start(set.id(), None).await.unwrap();
        assert!(!anonymous.editable);
    }

    #[tokio::test]
    async fn empty_set_starts_completed() {
        let repo = InMemoryRepository::new();
        let owner = User::new(
            UserId::generate(),
            "Owner",
            Email::parse("empty@example.com").unwrap(),
            NaiveDate::from_ymd_opt(1999, 9, 9).unwrap(),
            None,
            "hash",
            fixed_now(),
        )
        .unwrap();
        repo.insert_user(&owner).await.unwrap();
        let set = StudySet::new(StudySetId::generate(), owner.id(), "Empty", None, fixed_now())
            .unwrap();
        repo.upsert_study_set(&set).await.unwrap();

        let service = FlashcardsModeService::new(Arc::new(repo.clone()), Arc::new(repo))
            .with_tough_review_policy(ToughReviewPolicy::Replace);
        let game = service.start(set.id(), None).await.unwrap();
        assert_eq!(game.controller.status(), SessionStatus::Completed);
        assert_eq!(
            game.controller.tough_review_policy(),
            ToughReviewPolicy::Replace
        );
    }

    #[tokio::test]
    async fn missing_set_is_not_found() {
        let repo = InMemoryRepository::new();
        let service = FlashcardsModeService::new(Arc::new(repo.clone()), Arc::new(repo));
        let err = service
            .start(StudySetId::generate(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, FlashcardsModeError::NotFound));
    }
}
