use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use study_core::model::{
    Email, Flashcard, FlashcardId, StudySet, StudySetId, User, UserId,
};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Maps a failed statement onto the storage contract: constraint
/// violations become `Conflict`/`NotFound`, everything else is a
/// connection problem.
pub(crate) fn db_error(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => StorageError::NotFound,
        _ => StorageError::Connection(e.to_string()),
    }
}

pub(crate) fn flashcard_id_from_i64(v: i64) -> Result<FlashcardId, StorageError> {
    u64::try_from(v)
        .map(FlashcardId::new)
        .map_err(|_| StorageError::Serialization("flashcard_id sign overflow".into()))
}

pub(crate) fn flashcard_id_to_i64(id: FlashcardId) -> Result<i64, StorageError> {
    i64::try_from(id.value())
        .map_err(|_| StorageError::Serialization("flashcard_id overflow".into()))
}

fn position_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid position: {v}")))
}

fn study_set_id_from_str(s: &str) -> Result<StudySetId, StorageError> {
    StudySetId::from_str(s).map_err(ser)
}

fn user_id_from_str(s: &str) -> Result<UserId, StorageError> {
    UserId::from_str(s).map_err(ser)
}

pub(crate) fn map_study_set_row(row: &SqliteRow) -> Result<StudySet, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let owner_id: String = row.try_get("owner_id").map_err(ser)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(ser)?;

    StudySet::new(
        study_set_id_from_str(&id)?,
        user_id_from_str(&owner_id)?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<Option<String>, _>("description").map_err(ser)?,
        created_at,
    )
    .map_err(ser)
}

pub(crate) fn map_flashcard_row(row: &SqliteRow) -> Result<Flashcard, StorageError> {
    let study_set_id: String = row.try_get("study_set_id").map_err(ser)?;

    Ok(Flashcard::new(
        flashcard_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        study_set_id_from_str(&study_set_id)?,
        row.try_get::<String, _>("term").map_err(ser)?,
        row.try_get::<String, _>("definition").map_err(ser)?,
        position_from_i64(row.try_get::<i64, _>("position").map_err(ser)?)?,
    ))
}

pub(crate) fn map_user_row(row: &SqliteRow) -> Result<User, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let email: String = row.try_get("email").map_err(ser)?;
    let birthday: NaiveDate = row.try_get("birthday").map_err(ser)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(ser)?;

    User::new(
        user_id_from_str(&id)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        Email::parse(email).map_err(ser)?,
        birthday,
        row.try_get::<Option<String>, _>("image").map_err(ser)?,
        row.try_get::<String, _>("password_hash").map_err(ser)?,
        created_at,
    )
    .map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_ids_are_rejected() {
        assert!(matches!(
            flashcard_id_from_i64(-1),
            Err(StorageError::Serialization(_))
        ));
        assert_eq!(flashcard_id_from_i64(7).unwrap(), FlashcardId::new(7));
    }

    #[test]
    fn malformed_uuid_is_a_serialization_error() {
        assert!(matches!(
            study_set_id_from_str("not-a-uuid"),
            Err(StorageError::Serialization(_))
        ));
    }
}
