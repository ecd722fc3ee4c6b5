use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{StudySetId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudySetError {
    #[error("study set title cannot be empty")]
    EmptyTitle,

    #[error("study set title is too long ({len} > {max})")]
    TitleTooLong { len: usize, max: usize },
}

//
// ─── STUDY SET ─────────────────────────────────────────────────────────────────
//

/// A titled, owned collection of flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySet {
    id: StudySetId,
    owner_id: UserId,
    title: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl StudySet {
    pub const MAX_TITLE_LEN: usize = 200;

    /// Creates a new study set.
    ///
    /// The title is trimmed; a blank description is normalized to `None`.
    ///
    /// # Errors
    ///
    /// Returns `StudySetError::EmptyTitle` if the title is empty or whitespace-only,
    /// and `StudySetError::TitleTooLong` past `MAX_TITLE_LEN` characters.
    pub fn new(
        id: StudySetId,
        owner_id: UserId,
        title: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, StudySetError> {
        let title = title.into();
        let title = title.trim();
        if title.is_empty() {
            return Err(StudySetError::EmptyTitle);
        }
        let len = title.chars().count();
        if len > Self::MAX_TITLE_LEN {
            return Err(StudySetError::TitleTooLong {
                len,
                max: Self::MAX_TITLE_LEN,
            });
        }

        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id,
            owner_id,
            title: title.to_owned(),
            description,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> StudySetId {
        self.id
    }

    #[must_use]
    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True when `viewer` owns this set. An anonymous viewer never does.
    #[must_use]
    pub fn is_owned_by(&self, viewer: Option<UserId>) -> bool {
        viewer == Some(self.owner_id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn rejects_blank_title() {
        let err = StudySet::new(
            StudySetId::generate(),
            UserId::generate(),
            "   ",
            None,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, StudySetError::EmptyTitle);
    }

    #[test]
    fn rejects_overlong_title() {
        let title = "x".repeat(StudySet::MAX_TITLE_LEN + 1);
        let err = StudySet::new(
            StudySetId::generate(),
            UserId::generate(),
            title,
            None,
            fixed_now(),
        )
        .unwrap_err();
        assert!(matches!(err, StudySetError::TitleTooLong { len: 201, .. }));
    }

    #[test]
    fn trims_title_and_drops_blank_description() {
        let set = StudySet::new(
            StudySetId::generate(),
            UserId::generate(),
            "  German verbs ",
            Some("   ".into()),
            fixed_now(),
        )
        .unwrap();
        assert_eq!(set.title(), "German verbs");
        assert_eq!(set.description(), None);
    }

    #[test]
    fn ownership_requires_matching_viewer() {
        let owner = UserId::generate();
        let set = StudySet::new(StudySetId::generate(), owner, "Set", None, fixed_now()).unwrap();
        assert!(set.is_owned_by(Some(owner)));
        assert!(!set.is_owned_by(Some(UserId::generate())));
        assert!(!set.is_owned_by(None));
    }
}
