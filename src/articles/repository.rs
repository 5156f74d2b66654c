// Database repository for articles

use sqlx::PgPool;

use crate::articles::models::{Article, UpdateArticle};
use crate::error::ApiError;

const ARTICLE_COLUMNS: &str = "id, title, content, author_id, created_at";

/// Repository for article operations
#[derive(Clone)]
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    /// Create a new ArticleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of articles, newest first
    pub async fn find_all(&self, page: i64, size: i64) -> Result<Vec<Article>, ApiError> {
        let offset = (page.max(1) - 1) * size;

        let articles = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(articles)
    }

    /// Total number of articles
    pub async fn count_all(&self) -> Result<i64, ApiError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Find an article by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Article>, ApiError> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    /// Create a new article stamped with its author
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        author_id: i32,
    ) -> Result<Article, ApiError> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "INSERT INTO articles (title, content, author_id) \
             VALUES ($1, $2, $3) RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(article)
    }

    /// Apply a patch to an existing article
    ///
    /// Fetch-merge-update inside one transaction; omitted patch fields keep
    /// their stored values. The author is re-stamped to the updating admin.
    pub async fn update(&self, patch: UpdateArticle, author_id: i32) -> Result<Article, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(patch.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Article".to_string(),
            id: patch.id.to_string(),
        })?;

        let updated = sqlx::query_as::<_, Article>(&format!(
            "UPDATE articles SET title = $1, content = $2, author_id = $3 \
             WHERE id = $4 RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(patch.title.unwrap_or(existing.title))
        .bind(patch.content.unwrap_or(existing.content))
        .bind(author_id)
        .bind(patch.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }
}
