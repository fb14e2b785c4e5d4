use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthCtx;

/// Hands the `AuthCtx` inserted by the access middleware to a handler.
///
/// A missing context means the route was registered without the middleware.
/// That is a wiring bug, not an anonymous caller, so it is a loud 500.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthCtx>() {
            Some(ctx) => Ok(AuthCtxExtractor(ctx.clone())),
            None => {
                tracing::error!(
                    method = %parts.method,
                    path = %parts.uri.path(),
                    "protected handler reached without AuthCtx; is the access middleware applied?"
                );
                Err(AppError::Internal)
            }
        }
    }
}
