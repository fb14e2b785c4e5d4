//! Token minting helpers shared by the verifier, middleware and handler tests.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

use super::clock::FixedClock;
use super::jwt::JwtVerifier;
use super::verifier::CredentialVerifier;
use crate::config::{AuthConfig, KeySource};

pub const SECRET: &str = "test-secret-with-enough-entropy-for-hs256";
pub const NOW: i64 = 1_700_000_000;

pub const ED25519_PUBLIC_PEM: &str = include_str!("testdata/ed25519_public.pem");
const ED25519_PRIVATE_PEM: &str = include_str!("testdata/ed25519_private.pem");
const FOREIGN_ED25519_PRIVATE_PEM: &str = include_str!("testdata/foreign_ed25519_private.pem");

pub fn hs256_config() -> AuthConfig {
    AuthConfig {
        key: KeySource::Secret(SECRET.to_string()),
        issuer: None,
        audience: None,
        leeway_seconds: 0,
    }
}

pub fn verifier_at(now: i64) -> JwtVerifier {
    JwtVerifier::with_clock(&hs256_config(), Arc::new(FixedClock(now))).unwrap()
}

pub fn shared_verifier_at(now: i64) -> Arc<dyn CredentialVerifier> {
    Arc::new(verifier_at(now))
}

pub fn mint_hs256(claims: &Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn mint_ed25519(claims: &Value) -> String {
    mint_eddsa(ED25519_PRIVATE_PEM, claims)
}

pub fn mint_foreign_ed25519(claims: &Value) -> String {
    mint_eddsa(FOREIGN_ED25519_PRIVATE_PEM, claims)
}

fn mint_eddsa(private_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_ed_pem(private_pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::EdDSA), claims, &key).unwrap()
}

/// Flip one bit of the decoded signature and re-encode it canonically.
pub fn flip_signature_bit(token: &str, bit: usize) -> String {
    let (message, signature) = token.rsplit_once('.').unwrap();
    let mut raw = URL_SAFE_NO_PAD.decode(signature).unwrap();
    raw[bit / 8] ^= 1 << (bit % 8);
    format!("{message}.{}", URL_SAFE_NO_PAD.encode(raw))
}
