use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use thiserror::Error;

use super::claims::IdentityClaim;
use super::clock::{Clock, SystemClock};
use super::verifier::{CredentialVerifier, VerificationError};
use crate::config::{AuthConfig, KeySource};

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid ed25519 public key pem: {0}")]
    InvalidPem(#[source] jsonwebtoken::errors::Error),
}

/// JWT verifier for HS256 (shared secret) or EdDSA (Ed25519 public key).
///
/// - Exactly one algorithm is accepted, the one matching the configured key.
/// - `exp`/`nbf` are checked here rather than by `jsonwebtoken`, against the
///   injected clock: a token is valid while `now < exp + leeway`.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl JwtVerifier {
    pub fn new(config: &AuthConfig) -> Result<Self, KeyError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, KeyError> {
        let (decoding_key, algorithm) = match &config.key {
            KeySource::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            KeySource::Ed25519PublicPem(pem) => (
                DecodingKey::from_ed_pem(pem.as_bytes()).map_err(KeyError::InvalidPem)?,
                Algorithm::EdDSA,
            ),
        };

        let mut validation = Validation::new(algorithm);
        // Time claims are judged in `check_time` with our own boundary.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
            leeway_seconds: i64::try_from(config.leeway_seconds).unwrap_or(i64::MAX),
            clock,
        })
    }

    fn check_time(&self, claim: &IdentityClaim) -> Result<(), VerificationError> {
        let now = self.clock.now();

        // exp == now is already expired.
        if now >= claim.exp.saturating_add(self.leeway_seconds) {
            return Err(VerificationError::Expired);
        }
        if let Some(nbf) = claim.nbf
            && now < nbf.saturating_sub(self.leeway_seconds)
        {
            return Err(VerificationError::NotYetValid);
        }
        Ok(())
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, credential: &str) -> Result<IdentityClaim, VerificationError> {
        if credential.is_empty() {
            return Err(VerificationError::malformed("empty credential"));
        }

        let data =
            jsonwebtoken::decode::<IdentityClaim>(credential, &self.decoding_key, &self.validation)
                .map_err(classify)?;
        let claim = data.claims;

        self.check_time(&claim)?;

        if claim.sub.trim().is_empty() {
            return Err(VerificationError::RejectedClaim("sub"));
        }

        Ok(claim)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> VerificationError {
    match err.kind() {
        // A token announcing any other algorithm was not signed with our key.
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
            VerificationError::InvalidSignature
        }
        ErrorKind::ExpiredSignature => VerificationError::Expired,
        ErrorKind::ImmatureSignature => VerificationError::NotYetValid,
        ErrorKind::InvalidIssuer => VerificationError::RejectedClaim("iss"),
        ErrorKind::InvalidAudience => VerificationError::RejectedClaim("aud"),
        _ => VerificationError::malformed(err.to_string()),
    }
}
