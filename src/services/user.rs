//! User service
//!
//! Registration, lookup, partial update and removal of user accounts.
//! Usernames and emails are unique; passwords are stored as argon2 hashes.

use crate::db::repositories::{
    is_unique_violation, CommentRepository, PostRepository, UserRepository,
};
use crate::models::{CreateUserInput, UpdateUserInput, User, UserDetail};
use crate::services::password::hash_password;
use crate::services::validation;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const DUPLICATE_USER: &str = "Username or email already registered";

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("User not found")]
    NotFound,

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Username or email is taken
    #[error("{0}")]
    UserExists(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            comment_repo,
        }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// - `ValidationError` if a field breaks its length or shape rule
    /// - `UserExists` if the username or email is already registered
    pub async fn create(&self, input: CreateUserInput) -> Result<User, UserServiceError> {
        validate_username(&input.username)?;
        validate_email(&input.email)?;
        validate_full_name(&input.full_name)?;
        if let Some(ref bio) = input.bio {
            validate_bio(bio)?;
        }
        validate_password(&input.password)?;

        self.ensure_available(Some(&input.username), Some(&input.email), None)
            .await?;

        let password_hash = hash_password(&input.password)?;
        let user = User::new(
            input.username,
            input.email,
            input.full_name,
            input.bio,
            password_hash,
        );

        match self.user_repo.create(&user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "User created");
                Ok(user)
            }
            // Lost a race with a concurrent registration
            Err(e) if is_unique_violation(&e) => {
                Err(UserServiceError::UserExists(DUPLICATE_USER.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self, skip: u32, limit: u32) -> Result<Vec<User>, UserServiceError> {
        Ok(self.user_repo.list(skip, limit).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, UserServiceError> {
        self.user_repo
            .get_by_id(id)
            .await?
            .ok_or(UserServiceError::NotFound)
    }

    /// A user together with everything they have written
    pub async fn get_detail(&self, id: Uuid) -> Result<UserDetail, UserServiceError> {
        let user = self.get(id).await?;
        let posts = self.post_repo.list_by_author(id).await?;
        let comments = self.comment_repo.list_by_author(id).await?;
        Ok(UserDetail {
            user,
            posts,
            comments,
        })
    }

    /// Apply the fields present in `input`
    ///
    /// Fields that are present are validated with the same rules as on
    /// registration. A new username or email must not belong to another user.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, UserServiceError> {
        let mut user = self.get(id).await?;

        if let Some(ref username) = input.username {
            validate_username(username)?;
        }
        if let Some(ref email) = input.email {
            validate_email(email)?;
        }
        if let Some(ref full_name) = input.full_name {
            validate_full_name(full_name)?;
        }
        if let Some(ref bio) = input.bio {
            validate_bio(bio)?;
        }
        if let Some(ref password) = input.password {
            validate_password(password)?;
        }

        self.ensure_available(input.username.as_deref(), input.email.as_deref(), Some(id))
            .await?;

        if let Some(username) = input.username {
            user.username = username;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(full_name) = input.full_name {
            user.full_name = full_name;
        }
        if let Some(bio) = input.bio {
            user.bio = Some(bio);
        }
        if let Some(password) = input.password {
            user.password_hash = hash_password(&password)?;
        }
        user.updated_at = Some(Utc::now());

        match self.user_repo.update(&user).await {
            Ok(user) => Ok(user),
            Err(e) if is_unique_violation(&e) => {
                Err(UserServiceError::UserExists(DUPLICATE_USER.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a user along with their posts and comments
    pub async fn delete(&self, id: Uuid) -> Result<(), UserServiceError> {
        if !self.user_repo.delete(id).await? {
            return Err(UserServiceError::NotFound);
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Fail if `username` or `email` belongs to a user other than `owner`
    async fn ensure_available(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        owner: Option<Uuid>,
    ) -> Result<(), UserServiceError> {
        let taken_by_other = |found: Option<User>| match found {
            Some(existing) => Some(existing.id) != owner,
            None => false,
        };

        if let Some(username) = username {
            if taken_by_other(self.user_repo.get_by_username(username).await?) {
                return Err(UserServiceError::UserExists(DUPLICATE_USER.to_string()));
            }
        }
        if let Some(email) = email {
            if taken_by_other(self.user_repo.get_by_email(email).await?) {
                return Err(UserServiceError::UserExists(DUPLICATE_USER.to_string()));
            }
        }
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), UserServiceError> {
    validation::length_between("username", username, 3, 50)
        .map_err(UserServiceError::ValidationError)
}

fn validate_email(email: &str) -> Result<(), UserServiceError> {
    validation::email(email).map_err(UserServiceError::ValidationError)
}

fn validate_full_name(full_name: &str) -> Result<(), UserServiceError> {
    validation::length_between("full_name", full_name, 1, 100)
        .map_err(UserServiceError::ValidationError)
}

fn validate_bio(bio: &str) -> Result<(), UserServiceError> {
    validation::max_length("bio", bio, 500).map_err(UserServiceError::ValidationError)
}

fn validate_password(password: &str) -> Result<(), UserServiceError> {
    if password.is_empty() {
        return Err(UserServiceError::ValidationError(
            "password cannot be empty".to_string(),
        ));
    }
    Ok(())
}
