use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::UserId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("user name cannot be empty")]
    EmptyName,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("birthday {0} is in the future")]
    BirthdayInFuture(NaiveDate),

    #[error("password hash cannot be empty")]
    EmptyPasswordHash,
}

//
// ─── EMAIL ─────────────────────────────────────────────────────────────────────
//

/// A syntactically valid, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parses and normalizes an email address.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidEmail` unless the address has exactly one `@`,
    /// a non-empty local part, and a dotted domain.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, UserError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        let invalid = || UserError::InvalidEmail(raw.as_ref().to_owned());

        let (local, domain) = normalized.split_once('@').ok_or_else(invalid)?;
        if local.is_empty()
            || domain.contains('@')
            || normalized.chars().any(char::is_whitespace)
        {
            return Err(invalid());
        }
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
            return Err(invalid());
        }

        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

//
// ─── USER ──────────────────────────────────────────────────────────────────────
//

/// A user account including its password hash.
///
/// Only the storage and service layers see this type; everything above them
/// works with `UserProfile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    birthday: NaiveDate,
    image: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user account.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmptyName` for a blank name,
    /// `UserError::BirthdayInFuture` if the birthday is after `created_at`,
    /// and `UserError::EmptyPasswordHash` if no hash was supplied.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: Email,
        birthday: NaiveDate,
        image: Option<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, UserError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(UserError::EmptyName);
        }
        if birthday > created_at.date_naive() {
            return Err(UserError::BirthdayInFuture(birthday));
        }
        let password_hash = password_hash.into();
        if password_hash.is_empty() {
            return Err(UserError::EmptyPasswordHash);
        }

        Ok(Self {
            id,
            name: name.to_owned(),
            email,
            birthday,
            image: image.filter(|i| !i.trim().is_empty()),
            password_hash,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy with a new profile picture (`None` clears it).
    #[must_use]
    pub fn with_image(&self, image: Option<String>) -> Self {
        Self {
            image: image.filter(|i| !i.trim().is_empty()),
            ..self.clone()
        }
    }

    /// Public view of the account, without the password hash.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            birthday: self.birthday,
            image: self.image.clone(),
            created_at: self.created_at,
        }
    }
}

/// What callers of the user API get back: an account minus its secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub birthday: NaiveDate,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
