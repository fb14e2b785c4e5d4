pub mod claims;
pub mod clock;
pub mod factory;
pub mod jwt;
pub mod verifier;

#[cfg(test)]
pub mod test_support;

pub use claims::IdentityClaim;
pub use factory::build_verifier;
pub use jwt::JwtVerifier;
pub use verifier::{CredentialVerifier, VerificationError};
