/*
 * Responsibility
 * - Read process configuration from the environment (.env is honoured)
 * - Validate it up front: a missing or contradictory value fails startup
 * - Resolve the trusted JWT key material (secret / PEM / PEM file)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/algovisualizer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("exactly one of JWT_SECRET, JWT_PUBLIC_KEY_PEM, JWT_PUBLIC_KEY_FILE must be set")]
    AmbiguousKey,
    #[error("failed to read {path}: {source}")]
    KeyFile {
        path: String,
        source: std::io::Error,
    },
}

/// Trusted key material, loaded once at startup.
#[derive(Clone, PartialEq, Eq)]
pub enum KeySource {
    /// HS256 shared secret.
    Secret(String),
    /// Ed25519 public key (SPKI PEM), EdDSA tokens.
    Ed25519PublicPem(String),
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        match self {
            Self::Secret(_) => f.write_str("Secret(..)"),
            Self::Ed25519PublicPem(_) => f.write_str("Ed25519PublicPem(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub key: KeySource,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub max_pool_size: u32,
    pub connect_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URI may carry credentials
        f.debug_struct("DatabaseConfig")
            .field("uri", &"..")
            .field("max_pool_size", &self.max_pool_size)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;
        let addr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout =
            Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 30)?);
        let request_body_limit_bytes = parse_or(&lookup, "REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;

        let database = DatabaseConfig {
            uri: non_empty(&lookup, "MONGODB_URI")
                .unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
            max_pool_size: parse_or(&lookup, "MONGODB_MAX_POOL_SIZE", 5)?,
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "MONGODB_CONNECT_TIMEOUT_SECONDS",
                10,
            )?),
        };

        let auth = AuthConfig {
            key: resolve_key(&lookup)?,
            issuer: non_empty(&lookup, "JWT_ISSUER"),
            audience: non_empty(&lookup, "JWT_AUDIENCE"),
            leeway_seconds: parse_or(&lookup, "JWT_LEEWAY_SECONDS", 0)?,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_timeout,
            request_body_limit_bytes,
            database,
            auth,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

fn resolve_key<F>(lookup: &F) -> Result<KeySource, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Presence is judged on the raw value so that `JWT_SECRET=` is rejected
    // as empty rather than silently ignored.
    let secret = lookup("JWT_SECRET");
    let pem = lookup("JWT_PUBLIC_KEY_PEM");
    let pem_file = lookup("JWT_PUBLIC_KEY_FILE");

    match (secret, pem, pem_file) {
        (Some(secret), None, None) => {
            if secret.is_empty() {
                return Err(ConfigError::Invalid("JWT_SECRET"));
            }
            Ok(KeySource::Secret(secret))
        }
        (None, Some(pem), None) => {
            let pem = pem.replace("\\n", "\n");
            if pem.trim().is_empty() {
                return Err(ConfigError::Invalid("JWT_PUBLIC_KEY_PEM"));
            }
            Ok(KeySource::Ed25519PublicPem(pem))
        }
        (None, None, Some(path)) => {
            let pem = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::KeyFile { path, source })?;
            Ok(KeySource::Ed25519PublicPem(pem))
        }
        (None, None, None) => Err(ConfigError::Missing("JWT_SECRET")),
        _ => Err(ConfigError::AmbiguousKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.database.uri, "mongodb://localhost:27017/algovisualizer");
        assert_eq!(config.database.max_pool_size, 5);
        assert_eq!(config.database.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
        assert_eq!(config.auth.key, KeySource::Secret("s3cret".into()));
        assert_eq!(config.auth.leeway_seconds, 0);
        assert!(config.auth.issuer.is_none());
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "PROD"),
            ("MONGODB_URI", "mongodb://db:27017/app"),
            ("MONGODB_MAX_POOL_SIZE", "20"),
            ("JWT_PUBLIC_KEY_PEM", "-----BEGIN PUBLIC KEY-----\\nabc\\n-----END PUBLIC KEY-----"),
            ("JWT_ISSUER", "https://issuer.example"),
            ("JWT_LEEWAY_SECONDS", "5"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(config.database.uri, "mongodb://db:27017/app");
        assert_eq!(config.database.max_pool_size, 20);
        assert_eq!(
            config.auth.key,
            KeySource::Ed25519PublicPem(
                "-----BEGIN PUBLIC KEY-----\nabc\n-----END PUBLIC KEY-----".into()
            )
        );
        assert_eq!(config.auth.issuer.as_deref(), Some("https://issuer.example"));
        assert_eq!(config.auth.leeway_seconds, 5);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn missing_key_fails_startup() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn empty_secret_is_invalid() {
        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("JWT_SECRET")));
    }

    #[test]
    fn two_key_sources_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_PUBLIC_KEY_PEM", "pem"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::AmbiguousKey));
    }

    #[test]
    fn unreadable_key_file_is_reported() {
        let err = Config::from_lookup(lookup_from(&[(
            "JWT_PUBLIC_KEY_FILE",
            "/nonexistent/jwt_public.pem",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::KeyFile { .. }));
    }

    #[test]
    fn key_file_is_loaded() {
        let path = concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/src/services/auth/testdata/ed25519_public.pem"
        );
        let config = Config::from_lookup(lookup_from(&[("JWT_PUBLIC_KEY_FILE", path)])).unwrap();
        match config.auth.key {
            KeySource::Ed25519PublicPem(pem) => assert!(pem.contains("BEGIN PUBLIC KEY")),
            other => panic!("unexpected key source: {other:?}"),
        }
    }

    #[test]
    fn garbage_numbers_are_invalid() {
        let err = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_LEEWAY_SECONDS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("JWT_LEEWAY_SECONDS")));
    }

    #[test]
    fn secrets_are_not_printed() {
        let rendered = format!("{:?}", KeySource::Secret("hunter2".into()));
        assert!(!rendered.contains("hunter2"));

        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("MONGODB_URI", "mongodb://app:hunter2@db:27017/app"),
        ]))
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
    }
}
