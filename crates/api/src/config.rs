//! Server settings read once at startup.

use std::net::{IpAddr, SocketAddr};

use crate::auth::jwt::JwtConfig;

/// Everything the API process needs to start: where to listen, which
/// database to use, which browser origins may call it, and how tokens are
/// signed.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Upper bound for the connection pool.
    pub db_max_connections: u32,
    /// Origins allowed by CORS, typically the web client's dev server.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `DATABASE_URL`         | required                   |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// JWT settings come from [`JwtConfig::from_env`]. Panics on missing or
    /// malformed values so a misconfigured server never starts.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", "3000"),
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", "20"),
            cors_origins: split_origins(&env_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", "30"),
            jwt: JwtConfig::from_env(),
        }
    }

    /// Socket address to bind. Panics if `host` is not an IP address.
    pub fn bind_addr(&self) -> SocketAddr {
        let ip: IpAddr = self
            .host
            .parse()
            .unwrap_or_else(|e| panic!("Invalid HOST address '{}': {e}", self.host));
        SocketAddr::new(ip, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_or(key, default)
        .parse()
        .unwrap_or_else(|e| panic!("{key} is invalid: {e}"))
}

/// Comma-separated origins; blanks are skipped.
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
