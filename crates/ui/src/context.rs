use std::sync::Arc;

use services::{FlashcardService, FlashcardsModeService, StudySetService};
use study_core::model::UserId;

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    /// The signed-in user, if any. Ownership checks are made against this.
    fn viewer(&self) -> Option<UserId>;

    fn study_sets(&self) -> Arc<StudySetService>;
    fn flashcards(&self) -> Arc<FlashcardService>;
    fn flashcards_mode(&self) -> Arc<FlashcardsModeService>;
}

#[derive(Clone)]
pub struct AppContext {
    viewer: Option<UserId>,
    study_sets: Arc<StudySetService>,
    flashcards: Arc<FlashcardService>,
    flashcards_mode: Arc<FlashcardsModeService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            viewer: app.viewer(),
            study_sets: app.study_sets(),
            flashcards: app.flashcards(),
            flashcards_mode: app.flashcards_mode(),
        }
    }

    #[must_use]
    pub fn viewer(&self) -> Option<UserId> {
        self.viewer
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
    pub fn flashcards_mode(&self) -> Arc<FlashcardsModeService> {
        Arc::clone(&self.flashcards_mode)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
