/*
 * Responsibility
 * - GET /users          placeholder listing
 * - GET /users/profile  protected; echoes the verified identity
 */
use axum::Json;

use crate::api::dto::profile::ProfileResponse;
use crate::api::extractors::AuthCtxExtractor;

pub const USERS_PLACEHOLDER: &str = "respond with a resource";

pub async fn list_users() -> &'static str {
    USERS_PLACEHOLDER
}

// Identity was verified by the access middleware; do not re-verify here.
pub async fn profile(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<ProfileResponse> {
    tracing::debug!(sub = %ctx.subject(), "profile accessed");
    Json(ProfileResponse::accessed(ctx.into_claim()))
}
