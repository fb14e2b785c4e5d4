//! Bearer credential check → `AuthCtx` in request extensions.
//!
//! Per request: extract `Authorization: Bearer <token>`, hand the token to the
//! injected `CredentialVerifier`, then either run the inner service once with
//! `AuthCtx` attached or answer 401. Only headers are read; the body is passed
//! through untouched.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{CredentialVerifier, VerificationError};

const BEARER: &str = "Bearer";

/// Guard every route currently registered on `router`.
///
/// Uses `route_layer`, so routes merged in afterwards stay public and
/// unmatched paths still 404 instead of 401.
///
/// ```ignore
/// let protected = Router::new().route("/profile", get(profile));
/// let users = Router::new()
///     .route("/", get(list_users))
///     .merge(middleware::auth::access::protect(protected, verifier));
/// ```
pub fn protect<S>(router: Router<S>, verifier: Arc<dyn CredentialVerifier>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(verifier, access_middleware))
}

async fn access_middleware(
    State(verifier): State<Arc<dyn CredentialVerifier>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let verified = extract_bearer(req.headers()).and_then(|token| verifier.verify(token));

    let claim = match verified {
        Ok(claim) => claim,
        Err(VerificationError::MissingCredential) => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                "missing bearer credential"
            );
            return Err(AppError::Unauthorized);
        }
        Err(err) => {
            tracing::warn!(
                reason = %err,
                method = %req.method(),
                path = %req.uri().path(),
                "credential verification failed"
            );
            return Err(AppError::Unauthorized);
        }
    };

    tracing::debug!(
        sub = %claim.subject(),
        expires_at = ?claim.expires_at(),
        "request authenticated"
    );

    // middleware → extractor
    req.extensions_mut().insert(AuthCtx::new(claim));

    Ok(next.run(req).await)
}

/// Pull the token out of the `Authorization` header.
///
/// - no header, or a scheme other than `Bearer` → `MissingCredential`
/// - `Bearer` with nothing usable after it → `MalformedCredential`
pub(crate) fn extract_bearer(headers: &HeaderMap) -> Result<&str, VerificationError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(VerificationError::MissingCredential);
    };

    let value = value
        .to_str()
        .map_err(|_| VerificationError::malformed("authorization header is not visible ASCII"))?
        .trim();

    let (scheme, rest) = value
        .split_once(|c: char| c.is_ascii_whitespace())
        .unwrap_or((value, ""));

    if !scheme.eq_ignore_ascii_case(BEARER) {
        return Err(VerificationError::MissingCredential);
    }

    let token = rest.trim();
    if token.is_empty() {
        return Err(VerificationError::malformed("empty bearer token"));
    }
    if token.contains(|c: char| c.is_ascii_whitespace()) {
        return Err(VerificationError::malformed("bearer token contains whitespace"));
    }

    Ok(token)
}
