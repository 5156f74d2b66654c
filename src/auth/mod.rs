// Authentication module
// Token-based authentication with per-route role enforcement

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{
    get_all_users_handler, get_user_by_id_handler, login_handler, register_handler,
};
pub use middleware::{AuthenticatedUser, RouteRoles};
pub use models::{AuthResponse, LoginRequest, RegisterRequest, Role, User, UserResponse};
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::TokenService;
