/*
 * Responsibility
 * - The authenticated context a handler sees
 * - The access middleware is its only writer (request extensions);
 *   handlers receive it read-only through AuthCtxExtractor
 */
use crate::services::auth::IdentityClaim;

/// Identity attached to a request that passed the access middleware.
///
/// The Rust type itself is the extensions key, so there is exactly one slot
/// for it per request.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    claim: IdentityClaim,
}

impl AuthCtx {
    pub fn new(claim: IdentityClaim) -> Self {
        Self { claim }
    }

    pub fn subject(&self) -> &str {
        self.claim.subject()
    }

    pub fn into_claim(self) -> IdentityClaim {
        self.claim
    }
}
