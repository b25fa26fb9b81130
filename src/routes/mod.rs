pub mod auth;
pub mod memberships;
pub mod roles;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/rol", post(roles::create))
        // Catalogs
        .route("/api/roles", get(roles::list).post(roles::create))
        .route(
            "/api/memberships",
            get(memberships::list).post(memberships::create),
        )
}
