mod articles;
mod auth;
mod comments;
mod db;
mod error;
mod response;
mod validation;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use articles::{Article, ArticleListResponse, ArticleRepository, CreateArticle, UpdateArticle};
use auth::{AuthService, RouteRoles, TokenService, UserRepository};
use comments::{Comment, CommentRepository};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        articles::handlers::list_articles,
        articles::handlers::get_article_by_id,
        articles::handlers::get_article_comments,
    ),
    components(
        schemas(Article, ArticleListResponse, CreateArticle, UpdateArticle, Comment)
    ),
    tags(
        (name = "articles", description = "Article endpoints")
    ),
    info(
        title = "Blog API",
        version = "1.0.0",
        description = "RESTful API for a minimal blogging backend"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
///
/// The token service holds the process-wide signing key, loaded once at
/// startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub article_repo: ArticleRepository,
    pub comment_repo: CommentRepository,
}

impl AppState {
    pub fn new(db: PgPool, token_service: TokenService) -> Self {
        let token_service = Arc::new(token_service);
        let auth_service = Arc::new(AuthService::new(
            UserRepository::new(db.clone()),
            token_service.clone(),
        ));

        Self {
            article_repo: ArticleRepository::new(db.clone()),
            comment_repo: CommentRepository::new(db.clone()),
            db,
            token_service,
            auth_service,
        }
    }
}

/// Handler for GET /
async fn index() -> &'static str {
    "Hello World!"
}

/// Creates and configures the application router
///
/// Route protection is declared here, per route group: routes outside a
/// guarded group are public and never enter the auth filter.
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Public routes: no role requirement, the filter is not invoked
    let public_routes = Router::new()
        .route("/", get(index))
        .route("/api/users/register", post(auth::register_handler))
        .route("/api/users/login", post(auth::login_handler))
        .route("/api/users/:id", get(auth::get_user_by_id_handler))
        .route("/api/articles", get(articles::list_articles))
        .route("/api/articles/:id", get(articles::get_article_by_id))
        .route(
            "/api/articles/:id/comments",
            get(articles::get_article_comments),
        );

    // Routes any authenticated user may invoke
    let user_routes = Router::new()
        .route("/api/users", get(auth::get_all_users_handler))
        .route("/api/comments", post(comments::create_comment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |State(state): State<AppState>, request: Request, next: Next| async move {
                RouteRoles::any_user().enforce(state, request, next).await
            },
        ));

    // Admin-only routes
    let admin_routes = Router::new()
        .route(
            "/api/articles",
            post(articles::create_article).put(articles::update_article),
        )
        .route("/api/comments/:id", delete(comments::delete_comment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |State(state): State<AppState>, request: Request, next: Next| async move {
                RouteRoles::admin().enforce(state, request, next).await
            },
        ));

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Blog API - Starting...");

    // Get configuration from environment variables; missing configuration or
    // an unreachable database aborts startup
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Signing key is loaded once and immutable for the process lifetime
    let state = AppState::new(db_pool, TokenService::new(&jwt_secret));
    let app = create_router(state);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Blog API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
