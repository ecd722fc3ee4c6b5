mod flashcard;
mod ids;
mod study_set;
mod user;

pub use ids::{FlashcardId, ParseIdError, StudySetId, UserId};

pub use flashcard::{Flashcard, sort_by_position};
pub use study_set::{StudySet, StudySetError};
pub use user::{Email, User, UserError, UserProfile};
