//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health       - Liveness check
//!
//! # Users
//! GET    /users        - List all users
//! POST   /users        - Create a user
//! GET    /users/{id}   - Fetch one user
//! PUT    /users/{id}   - Update fields of one user
//! DELETE /users/{id}   - Delete one user
//! ```

pub mod users;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the user resource router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

/// Build the full application router over `state`.
///
/// Middleware (request tracing, panic recovery) is layered on by the binary;
/// tests drive this router bare.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(user_routes())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the store.
async fn health() -> &'static str {
    "ok"
}
