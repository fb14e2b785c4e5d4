/*
 * Responsibility
 * - The transport-independent verification seam (CredentialVerifier)
 * - The error taxonomy shared by the verifier and the access middleware
 */
use thiserror::Error;

use super::claims::IdentityClaim;

/// Why a request failed authentication.
///
/// The distinction only ever reaches the logs; every variant is answered with
/// the same 401 body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("no bearer credential presented")]
    MissingCredential,
    #[error("malformed credential: {0}")]
    MalformedCredential(String),
    #[error("signature does not match a trusted key")]
    InvalidSignature,
    #[error("credential expired")]
    Expired,
    #[error("credential not yet valid")]
    NotYetValid,
    #[error("rejected '{0}' claim")]
    RejectedClaim(&'static str),
}

impl VerificationError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCredential(reason.into())
    }
}

/// Turns a bearer credential (scheme already stripped) into an identity.
///
/// Implementations must be pure with respect to shared state: they are called
/// concurrently from every request without coordination.
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug {
    fn verify(&self, credential: &str) -> Result<IdentityClaim, VerificationError>;
}
