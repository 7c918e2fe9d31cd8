use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "estate.toml",
    "config/estate.toml",
    "crates/config/estate.toml",
    "../estate.toml",
    "../config/estate.toml",
    "../crates/config/estate.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            !self.auth.signing_key.trim().is_empty(),
            "auth.signing_key must be set"
        );
        ensure!(
            self.auth.token_ttl_seconds > 0,
            "auth.token_ttl_seconds must be positive"
        );
        ensure!(
            self.http.request_timeout_ms > 0,
            "http.request_timeout_ms must be positive"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
    #[serde(default = "HttpConfig::default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl HttpConfig {
    const fn default_request_timeout() -> u64 {
        5_000
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout_ms: Self::default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://estate.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric HS256 key shared by every token the process issues.
    #[serde(default)]
    pub signing_key: String,
    #[serde(default = "AuthConfig::default_token_ttl")]
    pub token_ttl_seconds: u64,
    /// Lifetime of the `token` cookie. Intentionally longer than the token itself.
    #[serde(default = "AuthConfig::default_cookie_max_age")]
    pub cookie_max_age_seconds: i64,
    #[serde(default)]
    pub password_hash: PasswordHashConfig,
}

impl AuthConfig {
    const fn default_token_ttl() -> u64 {
        900
    }

    const fn default_cookie_max_age() -> i64 {
        3_600
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_key: String::new(),
            token_ttl_seconds: Self::default_token_ttl(),
            cookie_max_age_seconds: Self::default_cookie_max_age(),
            password_hash: PasswordHashConfig::default(),
        }
    }
}

/// Argon2id work factor.
///
/// ```
/// use estate_config::PasswordHashConfig;
///
/// let cost = PasswordHashConfig::default();
/// assert_eq!(cost.memory_kib, 19_456);
/// assert_eq!(cost.iterations, 2);
/// assert_eq!(cost.parallelism, 1);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PasswordHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use estate_config::load;
///
/// std::env::remove_var("ESTATE_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();
    let hash = defaults.auth.password_hash;

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default(
            "http.request_timeout_ms",
            i64::try_from(defaults.http.request_timeout_ms).unwrap_or(i64::MAX),
        )?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default(
            "auth.token_ttl_seconds",
            i64::try_from(defaults.auth.token_ttl_seconds).unwrap_or(i64::MAX),
        )?
        .set_default(
            "auth.cookie_max_age_seconds",
            defaults.auth.cookie_max_age_seconds,
        )?
        .set_default("auth.password_hash.memory_kib", i64::from(hash.memory_kib))?
        .set_default("auth.password_hash.iterations", i64::from(hash.iterations))?
        .set_default("auth.password_hash.parallelism", i64::from(hash.parallelism))?;

    let environment_overrides = config::Environment::with_prefix("ESTATE").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ESTATE_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ESTATE_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(
        http.address = %config.http.address,
        http.port = config.http.port,
        database.url = %config.database.url,
        "loaded backend configuration"
    );
    Ok(config)
}
