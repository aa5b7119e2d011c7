/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 起動後は immutable (署名用 secret もここで一度だけ読む)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
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
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // None => in-memory store (local development only)
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub seed_account_ids: Vec<Uuid>,

    pub cors_allowed_origins: Vec<String>,
    pub request_body_limit_bytes: usize,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    pub access_token_secret: String,
    pub access_token_leeway_seconds: u64,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret or the database credentials
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("database", &self.database_url.as_ref().map(|_| "postgres"))
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .field("auth_issuer", &self.auth_issuer)
            .field("auth_audience", &self.auth_audience)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let seed_account_ids = split_list(&std::env::var("SEED_ACCOUNT_IDS").unwrap_or_default())
            .iter()
            .map(|s| Uuid::parse_str(s))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::Invalid("SEED_ACCOUNT_IDS"))?;

        let cors_allowed_origins =
            split_list(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let sqids_min_length = std::env::var("SQIDS_MIN_LENGTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10);

        let sqids_alphabet = std::env::var("SQIDS_ALPHABET").unwrap_or_else(|_| {
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
        });

        let access_token_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;
        if access_token_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_SECRET"));
        }

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let auth_issuer = std::env::var("AUTH_ISSUER")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let auth_audience = std::env::var("AUTH_AUDIENCE")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            seed_account_ids,
            cors_allowed_origins,
            request_body_limit_bytes,
            sqids_min_length,
            sqids_alphabet,
            access_token_secret,
            access_token_leeway_seconds,
            auth_issuer,
            auth_audience,
        })
    }
}

// Comma-separated env values, blanks dropped
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blank_entries() {
        assert_eq!(
            split_list(" https://a.example , ,https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = Config {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            app_env: AppEnv::Development,
            database_url: Some("postgres://user:pw@localhost/db".into()),
            database_max_connections: 1,
            seed_account_ids: Vec::new(),
            cors_allowed_origins: Vec::new(),
            request_body_limit_bytes: 1024,
            sqids_min_length: 10,
            sqids_alphabet: "abc".into(),
            access_token_secret: "super-secret-value".into(),
            access_token_leeway_seconds: 0,
            auth_issuer: None,
            auth_audience: None,
        };

        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret-value"));
        assert!(!printed.contains("user:pw"));
    }
}
