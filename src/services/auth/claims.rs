/*
 * Responsibility
 * - The decoded, verified payload of a bearer credential (IdentityClaim)
 * - Built fresh per request by the verifier and never persisted
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity asserted by a verified credential.
///
/// Registered claims the verifier relies on are typed; everything else the
/// issuer put in the payload (`iss`, `aud`, `email`, ...) is kept in `extra`
/// untouched so handlers can echo it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaim {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityClaim {
    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
