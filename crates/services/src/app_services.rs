use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::flashcard_service::FlashcardService;
use crate::flashcards_mode_service::FlashcardsModeService;
use crate::study_set_service::StudySetService;
use crate::user_service::UserService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    study_sets: Arc<StudySetService>,
    flashcards: Arc<FlashcardService>,
    users: Arc<UserService>,
    flashcards_mode: Arc<FlashcardsModeService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services backed by in-memory repositories.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            study_sets: Arc::new(StudySetService::new(clock, Arc::clone(&storage.study_sets))),
            flashcards: Arc::new(FlashcardService::new(
                Arc::clone(&storage.study_sets),
                Arc::clone(&storage.flashcards),
            )),
            users: Arc::new(UserService::new(clock, Arc::clone(&storage.users))),
            flashcards_mode: Arc::new(FlashcardsModeService::new(
                Arc::clone(&storage.study_sets),
                Arc::clone(&storage.flashcards),
            )),
        }
    }

    #[must_use]
    pub fn study_sets(&self) -> Arc<StudySetService> {
        Arc::clone(&self.study_sets)
    }

    #[must_use]
    pub fn flashcards(&self) -> Arc<FlashcardService> {
        Arc::clone(&self.flashcards)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }

    #[must_use]
    pub fn flashcards_mode(&self) -> Arc<FlashcardsModeService> {
        Arc::clone(&self.flashcards_mode)
    }
}
