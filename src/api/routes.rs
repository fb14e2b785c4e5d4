/*
 * Responsibility
 * - URL structure: index table at /, users table at /users, /health
 * - Decide which routes sit behind the access middleware (only /users/profile)
 */
use std::sync::Arc;

use axum::{Router, routing::get};

use crate::api::handlers::{
    health::health,
    index::{home, status},
    users::{list_users, profile},
};
use crate::middleware::auth::access;
use crate::services::auth::CredentialVerifier;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(index_routes())
        .nest("/users", users_routes(state.auth.clone()))
        .route("/health", get(health))
}

pub fn index_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home))
        .route("/status", get(status))
}

pub fn users_routes<S>(verifier: Arc<dyn CredentialVerifier>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let protected = access::protect(Router::new().route("/profile", get(profile)), verifier);

    Router::new().route("/", get(list_users)).merge(protected)
}
