//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use study_core::model::{StudySetError, UserError};

/// Errors emitted by `StudySetService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudySetServiceError {
    #[error("study set not found")]
    NotFound,
    #[error("only the owner can change this study set")]
    Forbidden,
    #[error(transparent)]
    StudySet(#[from] StudySetError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `FlashcardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlashcardServiceError {
    #[error("study set not found")]
    StudySetNotFound,
    #[error("flashcard not found")]
    NotFound,
    #[error("only the owner can change these flashcards")]
    Forbidden,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `UserService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserServiceError {
    #[error("user not found")]
    NotFound,
    #[error("email is already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted when starting a flashcards game.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlashcardsModeError {
    #[error("study set not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
