// HTTP handlers for article endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::articles::models::{Article, ArticleListQuery, ArticleListResponse, CreateArticle, UpdateArticle};
use crate::auth::middleware::AuthenticatedUser;
use crate::comments::models::Comment;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;

/// Handler for GET /api/articles
/// Returns one page of articles plus the total count
#[utoipa::path(
    get,
    path = "/api/articles",
    params(
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "One page of articles", body = ArticleListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "articles"
)]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> Result<Json<ApiResponse<ArticleListResponse>>, ApiError> {
    tracing::debug!("Fetching articles page={} size={}", query.page, query.size);

    let articles = state.article_repo.find_all(query.page, query.size).await?;
    let total = state.article_repo.count_all().await?;

    Ok(Json(ApiResponse::ok(ArticleListResponse {
        articles,
        total,
    })))
}

/// Handler for GET /api/articles/:id
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(
        ("id" = i32, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article found", body = Article),
        (status = 404, description = "Article not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "articles"
)]
pub async fn get_article_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Article>>, ApiError> {
    let article = state
        .article_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Article".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(ApiResponse::ok(article)))
}

/// Handler for GET /api/articles/:id/comments
#[utoipa::path(
    get,
    path = "/api/articles/{id}/comments",
    params(
        ("id" = i32, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Comments for the article", body = Vec<Comment>),
        (status = 500, description = "Internal server error")
    ),
    tag = "articles"
)]
pub async fn get_article_comments(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<Comment>>>, ApiError> {
    let comments = state.comment_repo.find_by_article_id(id).await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// Handler for POST /api/articles (admin only)
/// Authorship is stamped from the identity the auth filter resolved
pub async fn create_article(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateArticle>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    payload.validate()?;

    let article = state
        .article_repo
        .create(&payload.title, &payload.content, user.user_id)
        .await?;

    tracing::info!(
        "Created article id={} by user id={}",
        article.id,
        user.user_id
    );
    Ok(Json(ApiResponse::code_only(StatusCode::OK)))
}

/// Handler for PUT /api/articles (admin only)
/// Explicit per-field merge; omitted fields keep their stored values
pub async fn update_article(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateArticle>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    payload.validate()?;

    let article = state.article_repo.update(payload, user.user_id).await?;

    tracing::info!(
        "Updated article id={} by user id={}",
        article.id,
        user.user_id
    );
    Ok(Json(ApiResponse::code_only(StatusCode::OK)))
}
