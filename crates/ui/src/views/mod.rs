mod edit_study_set;
mod flashcards;
mod home;
mod state;
mod study_set;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use edit_study_set::EditStudySetView;
pub use flashcards::FlashcardsView;
pub use home::HomeView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use study_set::StudySetView;
