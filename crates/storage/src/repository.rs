use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use study_core::model::{
    Email, Flashcard, FlashcardId, StudySet, StudySetId, User, UserId, sort_by_position,
};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for study sets.
#[async_trait]
pub trait StudySetRepository: Send + Sync {
    /// Persist or update a study set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the owner does not exist, or other
    /// storage errors.
    async fn upsert_study_set(&self, set: &StudySet) -> Result<(), StorageError>;

    /// Fetch a study set by ID. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails.
    async fn get_study_set(&self, id: StudySetId) -> Result<Option<StudySet>, StorageError>;

    /// List the sets owned by `owner`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_study_sets(
        &self,
        owner: UserId,
        limit: u32,
    ) -> Result<Vec<StudySet>, StorageError>;

    /// Delete a study set together with its flashcards.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the set does not exist.
    async fn delete_study_set(&self, id: StudySetId) -> Result<(), StorageError>;
}

/// Repository contract for flashcards.
#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Append a card at the end of a set (position `max + 1`, or 0 for an
    /// empty set) and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the study set does not exist.
    async fn append_flashcard(
        &self,
        study_set_id: StudySetId,
        term: &str,
        definition: &str,
    ) -> Result<Flashcard, StorageError>;

    /// Overwrite term and definition of an existing card.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the card is not in the given set.
    async fn update_flashcard(&self, card: &Flashcard) -> Result<(), StorageError>;

    /// Delete a card from a set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the card is not in the given set.
    async fn delete_flashcard(
        &self,
        study_set_id: StudySetId,
        id: FlashcardId,
    ) -> Result<(), StorageError>;

    /// All cards of a set in study order (position, then id).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_flashcards(&self, study_set_id: StudySetId)
    -> Result<Vec<Flashcard>, StorageError>;
}

/// Repository contract for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id or email is already taken.
    async fn insert_user(&self, user: &User) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails.
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, StorageError>;

    /// Replace (or clear) the profile picture.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user does not exist.
    async fn update_user_image(&self, id: UserId, image: Option<&str>)
    -> Result<(), StorageError>;

    /// Delete a user and everything they own.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user does not exist.
    async fn delete_user(&self, id: UserId) -> Result<(), StorageError>;
}

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    study_sets: HashMap<StudySetId, StudySet>,
    flashcards: HashMap<FlashcardId, Flashcard>,
    next_flashcard_id: u64,
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Mirrors the `SQLite` schema's constraints: unique emails, owners must
/// exist, and deletes cascade from users to sets to cards.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

impl MemoryState {
    fn remove_study_set(&mut self, id: StudySetId) -> bool {
        if self.study_sets.remove(&id).is_none() {
            return false;
        }
        self.flashcards.retain(|_, card| card.study_set_id() != id);
        true
    }
}

#[async_trait]
impl StudySetRepository for InMemoryRepository {
    async fn upsert_study_set(&self, set: &StudySet) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if !guard.users.contains_key(&set.owner_id()) {
            return Err(StorageError::NotFound);
        }
        guard.study_sets.insert(set.id(), set.clone());
        Ok(())
    }

    async fn get_study_set(&self, id: StudySetId) -> Result<Option<StudySet>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.study_sets.get(&id).cloned())
    }

    async fn list_study_sets(
        &self,
        owner: UserId,
        limit: u32,
    ) -> Result<Vec<StudySet>, StorageError> {
        let guard = self.lock()?;
        let mut sets: Vec<StudySet> = guard
            .study_sets
            .values()
            .filter(|set| set.owner_id() == owner)
            .cloned()
            .collect();
        sets.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        sets.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(sets)
    }

    async fn delete_study_set(&self, id: StudySetId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if guard.remove_study_set(id) {
            Ok(())
        } else {
            Err(StorageError::NotFound)
        }
    }
}

#[async_trait]
impl FlashcardRepository for InMemoryRepository {
    async fn append_flashcard(
        &self,
        study_set_id: StudySetId,
        term: &str,
        definition: &str,
    ) -> Result<Flashcard, StorageError> {
        let mut guard = self.lock()?;
        if !guard.study_sets.contains_key(&study_set_id) {
            return Err(StorageError::NotFound);
        }
        let position = guard
            .flashcards
            .values()
            .filter(|card| card.study_set_id() == study_set_id)
            .map(Flashcard::position)
            .max()
            .map_or(0, |max| max.saturating_add(1));

        guard.next_flashcard_id += 1;
        let card = Flashcard::new(
            FlashcardId::new(guard.next_flashcard_id),
            study_set_id,
            term,
            definition,
            position,
        );
        guard.flashcards.insert(card.id(), card.clone());
        Ok(card)
    }

    async fn update_flashcard(&self, card: &Flashcard) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        match guard.flashcards.get_mut(&card.id()) {
            Some(existing) if existing.study_set_id() == card.study_set_id() => {
                *existing = existing.with_text(card.term(), card.definition());
                Ok(())
            }
            _ => Err(StorageError::NotFound),
        }
    }

    async fn delete_flashcard(
        &self,
        study_set_id: StudySetId,
        id: FlashcardId,
    ) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        match guard.flashcards.get(&id) {
            Some(card) if card.study_set_id() == study_set_id => {
                guard.flashcards.remove(&id);
                Ok(())
            }
            _ => Err(StorageError::NotFound),
        }
    }

    async fn list_flashcards(
        &self,
        study_set_id: StudySetId,
    ) -> Result<Vec<Flashcard>, StorageError> {
        let guard = self.lock()?;
        let mut cards: Vec<Flashcard> = guard
            .flashcards
            .values()
            .filter(|card| card.study_set_id() == study_set_id)
            .cloned()
            .collect();
        sort_by_position(&mut cards);
        Ok(cards)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, user: &User) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        let taken = guard.users.contains_key(&user.id())
            || guard.users.values().any(|u| u.email() == user.email());
        if taken {
            return Err(StorageError::Conflict);
        }
        guard.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.users.values().find(|u| u.email() == email).cloned())
    }

    async fn update_user_image(
        &self,
        id: UserId,
        image: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        let user = guard.users.get_mut(&id).ok_or(StorageError::NotFound)?;
        *user = user.with_image(image.map(str::to_owned));
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if guard.users.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        let owned: Vec<StudySetId> = guard
            .study_sets
            .values()
            .filter(|set| set.owner_id() == id)
            .map(StudySet::id)
            .collect();
        for set_id in owned {
            guard.remove_study_set(set_id);
        }
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub study_sets: Arc<dyn StudySetRepository>,
    pub flashcards: Arc<dyn FlashcardRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let study_sets: Arc<dyn StudySetRepository> = Arc::new(repo.clone());
        let flashcards: Arc<dyn FlashcardRepository> = Arc::new(repo.clone());
        let users: Arc<dyn UserRepository> = Arc::new(repo);
        Self {
            study_sets,
            flashcards,
            users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use study_core::time::fixed_now;

    fn build_user(email: &str) -> User {
        User::new(
            UserId::generate(),
            "Ada",
            Email::parse(email).unwrap(),
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            None,
            "hash",
            fixed_now(),
        )
        .unwrap()
    }

    fn build_set(owner: UserId, title: &str) -> StudySet {
        StudySet::new(StudySetId::generate(), owner, title, None, fixed_now()).unwrap()
    }

    #[tokio::test]
    async fn appends_flashcards_in_position_order() {
        let repo = InMemoryRepository::new();
        let user = build_user("ada@example.com");
        repo.insert_user(&user).await.unwrap();
        let set = build_set(user.id(), "Spanish");
        repo.upsert_study_set(&set).await.unwrap();

        let first = repo.append_flashcard(set.id(), "hola", "hello").await.unwrap();
        let second = repo.append_flashcard(set.id(), "adiós", "bye").await.unwrap();
        assert_eq!(first.position(), 0);
        assert_eq!(second.position(), 1);

        repo.delete_flashcard(set.id(), first.id()).await.unwrap();
        let third = repo.append_flashcard(set.id(), "gracias", "thanks").await.unwrap();
        assert_eq!(third.position(), 2);

        let listed = repo.list_flashcards(set.id()).await.unwrap();
        let terms: Vec<&str> = listed.iter().map(Flashcard::term).collect();
        assert_eq!(terms, vec!["adiós", "gracias"]);
    }

    #[tokio::test]
    async fn append_to_missing_set_is_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo
            .append_flashcard(StudySetId::generate(), "a", "b")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn update_requires_matching_set() {
        let repo = InMemoryRepository::new();
        let user = build_user("ada@example.com");
        repo.insert_user(&user).await.unwrap();
        let set = build_set(user.id(), "Set");
        repo.upsert_study_set(&set).await.unwrap();
        let card = repo.append_flashcard(set.id(), "a", "b").await.unwrap();

        let foreign = Flashcard::new(card.id(), StudySetId::generate(), "x", "y", 0);
        let err = repo.update_flashcard(&foreign).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));

        repo.update_flashcard(&card.with_text("c", "d")).await.unwrap();
        let listed = repo.list_flashcards(set.id()).await.unwrap();
        assert_eq!(listed[0].term(), "c");
        assert_eq!(listed[0].position(), card.position());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repo = InMemoryRepository::new();
        repo.insert_user(&build_user("ada@example.com")).await.unwrap();
        let err = repo
            .insert_user(&build_user("ADA@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn study_set_requires_existing_owner() {
        let repo = InMemoryRepository::new();
        let err = repo
            .upsert_study_set(&build_set(UserId::generate(), "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn lists_newest_sets_first_with_limit() {
        let repo = InMemoryRepository::new();
        let user = build_user("ada@example.com");
        repo.insert_user(&user).await.unwrap();
        for (i, title) in ["old", "mid", "new"].into_iter().enumerate() {
            let set = StudySet::new(
                StudySetId::generate(),
                user.id(),
                title,
                None,
                fixed_now() + Duration::minutes(i64::try_from(i).unwrap()),
            )
            .unwrap();
            repo.upsert_study_set(&set).await.unwrap();
        }

        let sets = repo.list_study_sets(user.id(), 2).await.unwrap();
        let titles: Vec<&str> = sets.iter().map(StudySet::title).collect();
        assert_eq!(titles, vec!["new", "mid"]);
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_sets_and_cards() {
        let repo = InMemoryRepository::new();
        let user = build_user("ada@example.com");
        repo.insert_user(&user).await.unwrap();
        let set = build_set(user.id(), "Set");
        repo.upsert_study_set(&set).await.unwrap();
        repo.append_flashcard(set.id(), "a", "b").await.unwrap();

        repo.delete_user(user.id()).await.unwrap();
        assert!(repo.get_study_set(set.id()).await.unwrap().is_none());
        assert!(repo.list_flashcards(set.id()).await.unwrap().is_empty());
        assert!(matches!(
            repo.delete_user(user.id()).await.unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[tokio::test]
    async fn updates_user_image() {
        let repo = InMemoryRepository::new();
        let user = build_user("ada@example.com");
        repo.insert_user(&user).await.unwrap();

        repo.update_user_image(user.id(), Some("/avatars/ada.png"))
            .await
            .unwrap();
        let stored = repo.get_user(user.id()).await.unwrap().unwrap();
        assert_eq!(stored.image(), Some("/avatars/ada.png"));

        let by_email = repo
            .find_user_by_email(user.email())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id(), user.id());
    }
}
