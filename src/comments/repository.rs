// Database repository for comments

use sqlx::PgPool;

use crate::comments::models::Comment;
use crate::error::ApiError;

const COMMENT_COLUMNS: &str = "id, content, article_id, user_id, created_at";

/// Repository for comment operations
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new CommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find all comments for a given article
    pub async fn find_by_article_id(&self, article_id: i32) -> Result<Vec<Comment>, ApiError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE article_id = $1 ORDER BY id"
        ))
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Create a new comment stamped with its author
    pub async fn create(
        &self,
        content: &str,
        article_id: i32,
        user_id: i32,
    ) -> Result<Comment, ApiError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (content, article_id, user_id) \
             VALUES ($1, $2, $3) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(content)
        .bind(article_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Delete a comment by id
    ///
    /// Deleting a comment that no longer exists is a no-op, not an error.
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
