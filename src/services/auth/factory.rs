/// Factory: build the process-wide credential verifier from `AuthConfig`.
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::services::auth::{CredentialVerifier, JwtVerifier, jwt::KeyError};

pub fn build_verifier(config: &AuthConfig) -> Result<Arc<dyn CredentialVerifier>, KeyError> {
    let verifier = JwtVerifier::new(config)?;

    tracing::info!(?verifier, "credential verifier ready");

    Ok(Arc::new(verifier))
}
