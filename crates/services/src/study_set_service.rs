use std::sync::Arc;

use storage::repository::{StorageError, StudySetRepository};
use study_core::model::{StudySet, StudySetId, UserId};
use tracing::{debug, info};

use crate::Clock;
use crate::error::StudySetServiceError;

/// Creates, edits and removes study sets on behalf of their owners.
#[derive(Clone)]
pub struct StudySetService {
    clock: Clock,
    study_sets: Arc<dyn StudySetRepository>,
}

impl StudySetService {
    #[must_use]
    pub fn new(clock: Clock, study_sets: Arc<dyn StudySetRepository>) -> Self {
        Self { clock, study_sets }
    }

    /// Create a study set owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `StudySetServiceError::StudySet` for validation failures.
    /// Returns `StudySetServiceError::NotFound` if the owner does not exist.
    pub async fn create(
        &self,
        owner: UserId,
        title: String,
        description: Option<String>,
    ) -> Result<StudySet, StudySetServiceError> {
        let set = StudySet::new(
            StudySetId::generate(),
            owner,
            title,
            description,
            self.clock.now(),
        )?;
        self.study_sets
            .upsert_study_set(&set)
            .await
            .map_err(not_found)?;
        info!(study_set = %set.id(), owner = %owner, "created study set");
        Ok(set)
    }

    /// Fetch a study set by ID.
    ///
    /// # Errors
    ///
    /// Returns `StudySetServiceError::NotFound` if it does not exist.
    pub async fn get(&self, id: StudySetId) -> Result<StudySet, StudySetServiceError> {
        self.study_sets
            .get_study_set(id)
            .await?
            .ok_or(StudySetServiceError::NotFound)
    }

    /// List the owner's sets, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudySetServiceError::Storage` if repository access fails.
    pub async fn list_for_owner(
        &self,
        owner: UserId,
        limit: u32,
    ) -> Result<Vec<StudySet>, StudySetServiceError> {
        let sets = self.study_sets.list_study_sets(owner, limit).await?;
        debug!(owner = %owner, count = sets.len(), "listed study sets");
        Ok(sets)
    }

    /// Retitle or redescribe a set. Only the owner may do this.
    ///
    /// # Errors
    ///
    /// Returns `StudySetServiceError::Forbidden` if `actor` is not the owner,
    /// `NotFound` if the set is missing, and `StudySet` for invalid input.
    pub async fn update(
        &self,
        actor: UserId,
        id: StudySetId,
        title: String,
        description: Option<String>,
    ) -> Result<StudySet, StudySetServiceError> {
        let existing = self.get(id).await?;
        ensure_owner(&existing, actor)?;

        let updated = StudySet::new(
            existing.id(),
            existing.owner_id(),
            title,
            description,
            existing.created_at(),
        )?;
        self.study_sets.upsert_study_set(&updated).await?;
        info!(study_set = %id, "updated study set");
        Ok(updated)
    }

    /// Delete a set and its flashcards. Only the owner may do this.
    ///
    /// # Errors
    ///
    /// Returns `StudySetServiceError::Forbidden` if `actor` is not the owner
    /// and `NotFound` if the set is missing.
    pub async fn delete(&self, actor: UserId, id: StudySetId) -> Result<(), StudySetServiceError> {
        let existing = self.get(id).await?;
        ensure_owner(&existing, actor)?;
        self.study_sets
            .delete_study_set(id)
            .await
            .map_err(not_found)?;
        info!(study_set = %id, "deleted study set");
        Ok(())
    }

    /// Whether `viewer` may edit `set`. Anonymous viewers never can.
    #[must_use]
    pub fn can_edit(&self, viewer: Option<UserId>, set: &StudySet) -> bool {
        set.is_owned_by(viewer)
    }
}

fn ensure_owner(set: &StudySet, actor: UserId) -> Result<(), StudySetServiceError> {
    if set.is_owned_by(Some(actor)) {
        Ok(())
    } else {
        Err(StudySetServiceError::Forbidden)
    }
}

fn not_found(err: StorageError) -> StudySetServiceError {
    match err {
        StorageError::NotFound => StudySetServiceError::NotFound,
        other => StudySetServiceError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use storage::repository::{InMemoryRepository, UserRepository};
    use study_core::model::{Email, StudySetError, User};
    use study_core::time::fixed_now;

    async fn seeded() -> (InMemoryRepository, StudySetService, UserId) {
        let repo = InMemoryRepository::new();
        let user = User::new(
            UserId::generate(),
            "Owner",
            Email::parse("owner@example.com").unwrap(),
            NaiveDate::from_ymd_opt(1995, 5, 5).unwrap(),
            None,
            "hash",
            fixed_now(),
        )
        .unwrap();
        repo.insert_user(&user).await.unwrap();
        let service = StudySetService::new(Clock::fixed(fixed_now()), Arc::new(repo.clone()));
        (repo, service, user.id())
    }

    #[tokio::test]
    async fn create_then_get_returns_set() {
        let (_repo, service, owner) = seeded().await;
        let set = service
            .create(owner, "  Biology  ".to_string(), None)
            .await
            .unwrap();
        assert_eq!(set.title(), "Biology");
        assert_eq!(set.created_at(), fixed_now());

        let fetched = service.get(set.id()).await.unwrap();
        assert_eq!(fetched, set);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let (_repo, service, owner) = seeded().await;
        let err = service.create(owner, "   ".to_string(), None).await.unwrap_err();
        assert!(matches!(
            err,
            StudySetServiceError::StudySet(StudySetError::EmptyTitle)
        ));
    }

    #[tokio::test]
    async fn create_for_unknown_owner_is_not_found() {
        let (_repo, service, _owner) = seeded().await;
        let err = service
            .create(UserId::generate(), "Orphan".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StudySetServiceError::NotFound));
    }

    #[tokio::test]
    async fn non_owner_cannot_update_or_delete() {
        let (_repo, service, owner) = seeded().await;
        let set = service.create(owner, "Mine".to_string(), None).await.unwrap();
        let stranger = UserId::generate();

        let err = service
            .update(stranger, set.id(), "Theirs".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StudySetServiceError::Forbidden));

        let err = service.delete(stranger, set.id()).await.unwrap_err();
        assert!(matches!(err, StudySetServiceError::Forbidden));

        assert!(!service.can_edit(Some(stranger), &set));
        assert!(!service.can_edit(None, &set));
        assert!(service.can_edit(Some(owner), &set));
    }

    #[tokio::test]
    async fn owner_updates_and_deletes() {
        let (_repo, service, owner) = seeded().await;
        let set = service.create(owner, "Draft".to_string(), None).await.unwrap();

        let updated = service
            .update(owner, set.id(), "Final".to_string(), Some("notes".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.title(), "Final");
        assert_eq!(updated.description(), Some("notes"));
        assert_eq!(updated.created_at(), set.created_at());

        service.delete(owner, set.id()).await.unwrap();
        let err = service.get(set.id()).await.unwrap_err();
        assert!(matches!(err, StudySetServiceError::NotFound));
    }
}
