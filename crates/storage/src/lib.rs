#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    FlashcardRepository, InMemoryRepository, Storage, StorageError, StudySetRepository,
    UserRepository,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
