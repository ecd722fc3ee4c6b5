use serde::{Deserialize, Serialize};

use crate::model::ids::{FlashcardId, StudySetId};

/// A single term/definition pair belonging to a study set.
///
/// Cards are ordered inside their set by `position`. Empty term or definition
/// text is allowed: a freshly added row in the editor starts out blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    id: FlashcardId,
    study_set_id: StudySetId,
    term: String,
    definition: String,
    position: u32,
}

impl Flashcard {
    #[must_use]
    pub fn new(
        id: FlashcardId,
        study_set_id: StudySetId,
        term: impl Into<String>,
        definition: impl Into<String>,
        position: u32,
    ) -> Self {
        Self {
            id,
            study_set_id,
            term: term.into(),
            definition: definition.into(),
            position,
        }
    }

    #[must_use]
    pub fn id(&self) -> FlashcardId {
        self.id
    }

    #[must_use]
    pub fn study_set_id(&self) -> StudySetId {
        self.study_set_id
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Returns a copy with new text, keeping identity and position.
    #[must_use]
    pub fn with_text(&self, term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            ..self.clone()
        }
    }
}

/// Sorts cards into study order: by position, ties broken by id.
pub fn sort_by_position(cards: &mut [Flashcard]) {
    cards.sort_by_key(|card| (card.position(), card.id()));
}
