use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API including the version prefix.
    pub api_url: String,
    /// Public origin used to build share links.
    pub origin: String,
    /// File holding locally persisted preferences (theme).
    pub prefs_path: PathBuf,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from the environment (and `.env`, if present).
    ///
    /// | Env Var                     | Default                          |
    /// |-----------------------------|----------------------------------|
    /// | `THOUGHTCACHE_API_URL`      | `http://localhost:3000/api/v1`   |
    /// | `THOUGHTCACHE_ORIGIN`       | `http://localhost:5173`          |
    /// | `THOUGHTCACHE_PREFS_PATH`   | `thoughtcache-prefs.json`        |
    /// | `THOUGHTCACHE_TIMEOUT_SECS` | `15`                             |
    ///
    /// # Panics
    ///
    /// Panics if `THOUGHTCACHE_TIMEOUT_SECS` is not a valid integer.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = std::env::var("THOUGHTCACHE_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1".into())
            .trim_end_matches('/')
            .to_string();

        let origin = std::env::var("THOUGHTCACHE_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".into());

        let prefs_path = std::env::var("THOUGHTCACHE_PREFS_PATH")
            .unwrap_or_else(|_| "thoughtcache-prefs.json".into())
            .into();

        let timeout_secs: u64 = std::env::var("THOUGHTCACHE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("THOUGHTCACHE_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            origin,
            prefs_path,
            timeout_secs,
        }
    }
}
