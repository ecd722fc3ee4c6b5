#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod flashcard_service;
pub mod flashcards_mode_service;
pub mod study_set_service;
pub mod user_service;

pub use study_core::Clock;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, FlashcardServiceError, FlashcardsModeError, StudySetServiceError,
    UserServiceError,
};
pub use flashcard_service::FlashcardService;
pub use flashcards_mode_service::{FlashcardsGame, FlashcardsModeService};
pub use study_set_service::StudySetService;
pub use user_service::{NewUser, UserService};
