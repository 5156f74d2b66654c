// Database repository for user records

use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{Role, User},
};

const USER_COLUMNS: &str = "id, username, password_hash, nickname, role, created_at";

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// The role is decided inside the insert transaction: the first user ever
    /// registered becomes admin, everyone after that is a regular user.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        nickname: &str,
    ) -> Result<User, AuthError> {
        let mut tx = self.pool.begin().await?;

        let any_users: Option<bool> = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users)")
            .fetch_one(&mut *tx)
            .await?;

        let role = if any_users.unwrap_or(false) {
            Role::User
        } else {
            Role::Admin
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password_hash, nickname, role) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(password_hash)
        .bind(nickname)
        .bind(role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // Unique constraint on username
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::UsernameTaken;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        tx.commit().await?;

        Ok(user)
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    /// List all users
    pub async fn find_all(&self) -> Result<Vec<User>, AuthError> {
        let users =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }

    /// Check if a username is already registered
    pub async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }
}
