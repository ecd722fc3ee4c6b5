use std::sync::Arc;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::NaiveDate;
use storage::repository::{StorageError, UserRepository};
use study_core::model::{Email, User, UserId, UserProfile};
use tracing::{info, warn};

use crate::Clock;
use crate::error::UserServiceError;

/// Sign-up input. The password is hashed before anything is stored.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub birthday: NaiveDate,
    pub password: String,
}

/// Account management. Callers only ever see `UserProfile`s.
#[derive(Clone)]
pub struct UserService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        Self { clock, users }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::EmailTaken` if the email is already
    /// registered, `EmptyPassword` for a blank password, `User` for invalid
    /// profile fields and `PasswordHash` if hashing fails.
    pub async fn create(&self, input: NewUser) -> Result<UserProfile, UserServiceError> {
        let email = Email::parse(&input.email)?;
        if input.password.is_empty() {
            return Err(UserServiceError::EmptyPassword);
        }
        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(UserServiceError::EmailTaken);
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(
            UserId::generate(),
            input.name,
            email,
            input.birthday,
            None,
            password_hash,
            self.clock.now(),
        )?;

        self.users.insert_user(&user).await.map_err(|e| match e {
            StorageError::Conflict => UserServiceError::EmailTaken,
            other => UserServiceError::Storage(other),
        })?;
        info!(user = %user.id(), "created user");
        Ok(user.profile())
    }

    /// # Errors
    ///
    /// Returns `UserServiceError::NotFound` if no such user exists.
    pub async fn get_by_id(&self, id: UserId) -> Result<UserProfile, UserServiceError> {
        self.users
            .get_user(id)
            .await?
            .map(|user| user.profile())
            .ok_or(UserServiceError::NotFound)
    }

    /// Set or clear the actor's own profile picture.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::NotFound` if the actor no longer exists.
    pub async fn edit_picture(
        &self,
        actor: UserId,
        image: Option<String>,
    ) -> Result<UserProfile, UserServiceError> {
        self.users
            .update_user_image(actor, image.as_deref())
            .await
            .map_err(user_not_found)?;
        self.get_by_id(actor).await
    }

    /// Delete the actor's own account, including their study sets.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::NotFound` if the actor does not exist.
    pub async fn delete(&self, actor: UserId) -> Result<(), UserServiceError> {
        self.users.delete_user(actor).await.map_err(user_not_found)?;
        info!(user = %actor, "deleted user");
        Ok(())
    }

    /// Check a credential pair.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::InvalidCredentials` for an unknown email or
    /// a wrong password. The two cases are indistinguishable to the caller.
    pub async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, UserServiceError> {
        let Ok(email) = Email::parse(email) else {
            return Err(UserServiceError::InvalidCredentials);
        };
        let Some(user) = self.users.find_user_by_email(&email).await? else {
            return Err(UserServiceError::InvalidCredentials);
        };

        let parsed = PasswordHash::new(user.password_hash())
            .map_err(|e| UserServiceError::PasswordHash(e.to_string()))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            warn!(user = %user.id(), "password verification failed");
            return Err(UserServiceError::InvalidCredentials);
        }
        Ok(user.profile())
    }
}

fn hash_password(password: &str) -> Result<String, UserServiceError> {
    let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
        .map_err(|e| UserServiceError::PasswordHash(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserServiceError::PasswordHash(e.to_string()))
}

fn user_not_found(err: StorageError) -> UserServiceError {
    match err {
        StorageError::NotFound => UserServiceError::NotFound,
        other => UserServiceError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::InMemoryRepository;
    use study_core::model::UserError;
    use study_core::time::fixed_now;

    fn service() -> UserService {
        UserService::new(
            Clock::fixed(fixed_now()),
            Arc::new(InMemoryRepository::new()),
        )
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Grace Hopper".to_string(),
            email: email.to_string(),
            birthday: NaiveDate::from_ymd_opt(1906, 12, 9).unwrap(),
            password: "correct horse".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_verify_password() {
        let service = service();
        let profile = service.create(new_user("grace@example.com")).await.unwrap();
        assert_eq!(profile.email.as_str(), "grace@example.com");

        let verified = service
            .verify_password("Grace@Example.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(verified.id, profile.id);

        let err = service
            .verify_password("grace@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, UserServiceError::InvalidCredentials));

        let err = service
            .verify_password("nobody@example.com", "correct horse")
            .await
            .unwrap_err();
        assert!(matches!(err, UserServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_email_is_taken() {
        let service = service();
        service.create(new_user("dup@example.com")).await.unwrap();
        let err = service.create(new_user("DUP@example.com")).await.unwrap_err();
        assert!(matches!(err, UserServiceError::EmailTaken));
    }

    #[tokio::test]
    async fn rejects_invalid_input() {
        let service = service();
        let err = service.create(new_user("not-an-email")).await.unwrap_err();
        assert!(matches!(err, UserServiceError::User(UserError::InvalidEmail(_))));

        let mut blank = new_user("blank@example.com");
        blank.password.clear();
        let err = service.create(blank).await.unwrap_err();
        assert!(matches!(err, UserServiceError::EmptyPassword));
    }

    #[tokio::test]
    async fn edit_picture_and_delete() {
        let service = service();
        let profile = service.create(new_user("pic@example.com")).await.unwrap();

        let updated = service
            .edit_picture(profile.id, Some("/avatars/g.png".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.image.as_deref(), Some("/avatars/g.png"));

        service.delete(profile.id).await.unwrap();
        let err = service.get_by_id(profile.id).await.unwrap_err();
        assert!(matches!(err, UserServiceError::NotFound));
        let err = service.delete(profile.id).await.unwrap_err();
        assert!(matches!(err, UserServiceError::NotFound));
    }
}
