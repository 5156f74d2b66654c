// Authentication service - business logic layer

use std::sync::Arc;

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, User, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};

/// Authentication service coordinating credential storage, password hashing
/// and token issuance
pub struct AuthService {
    user_repo: UserRepository,
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(user_repo: UserRepository, token_service: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Register a new user
    ///
    /// Returns no token; login is a separate step. The first user ever
    /// registered is promoted to admin by the repository.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        nickname: &str,
    ) -> Result<(), AuthError> {
        if self.user_repo.username_exists(username).await? {
            tracing::debug!("Registration rejected, username taken: {}", username);
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = PasswordService::hash_password(password)?;

        let user = self
            .user_repo
            .create_user(username, &password_hash, nickname)
            .await?;

        tracing::info!(
            "Registered user {} (id={}, role={})",
            user.username,
            user.id,
            user.role
        );
        Ok(())
    }

    /// Login a user, returning a fresh token and the sanitized identity view
    ///
    /// Unknown username and wrong password produce the same error; callers
    /// cannot enumerate usernames through this endpoint.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let user = match self.user_repo.find_by_username(username).await? {
            Some(user) => user,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !PasswordService::verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.token_service.issue(user.id)?;
        tracing::debug!("Issued token for user id={}", user.id);

        Ok(AuthResponse {
            token,
            user: UserResponse::from(user),
        })
    }

    /// List all users, sans password hashes
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, AuthError> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Fetch a single user by id, sans password hash
    pub async fn get_user(&self, id: i32) -> Result<UserResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserResponse::from(user))
    }

    /// Resolve a token subject against the credential store
    ///
    /// A valid token whose subject has since been deleted is a rejection, not
    /// a dangling identity.
    pub async fn resolve_subject(&self, user_id: i32) -> Result<User, AuthError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UnknownSubject)
    }
}
