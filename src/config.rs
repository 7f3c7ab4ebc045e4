/*
 * Responsibility
 * - Load settings from the environment (PORT, JWT_SECRET, DATABASE_URL, CORS, ...)
 * - Validate them (startup fails on missing/invalid values)
 * - Group auth settings into AuthSettings, handed to the token verifier/issuer at construction
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Used when `JWT_SECRET` is unset. Insecure: anyone who knows it can mint
/// admin tokens. Kept because deployments rely on it; startup logs a warning.
pub const INSECURE_DEFAULT_JWT_SECRET: &str = "secretKey";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// Unset means development; unrecognised values are rejected.
    fn parse(raw: Option<String>) -> Result<Self, ConfigError> {
        let Some(raw) = raw else {
            return Ok(Self::Development);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::Invalid("APP_ENV")),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Token signing/verification settings.
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,
    pub leeway_seconds: u64,
    /// Attach a fixed development admin identity instead of checking tokens.
    pub dev_bypass: bool,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_seconds: 86_400,
            leeway_seconds: 0,
            dev_bypass: false,
        }
    }

    pub fn uses_insecure_default(&self) -> bool {
        self.jwt_secret == INSECURE_DEFAULT_JWT_SECRET
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print the secret
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("dev_bypass", &self.dev_bypass)
            .finish()
    }
}

#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: Option<String>,
    pub cors_allowed_origins: Vec<String>,

    pub auth: AuthSettings,
    pub bootstrap_admin: Option<BootstrapAdmin>,

    pub http_timeout: Duration,
    pub http_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match non_empty("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"))?;

        let database_url = non_empty("DATABASE_URL");

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let jwt_secret =
            non_empty("JWT_SECRET").unwrap_or_else(|| INSECURE_DEFAULT_JWT_SECRET.to_string());

        let token_ttl_seconds = parse_or(
            "JWT_EXPIRES_IN_SECONDS",
            non_empty("JWT_EXPIRES_IN_SECONDS"),
            86_400,
        )?;
        if token_ttl_seconds == 0 {
            return Err(ConfigError::Invalid("JWT_EXPIRES_IN_SECONDS"));
        }
        let leeway_seconds = parse_or("JWT_LEEWAY_SECONDS", non_empty("JWT_LEEWAY_SECONDS"), 0)?;

        let dev_bypass = match non_empty("AUTH_DEV_BYPASS") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("AUTH_DEV_BYPASS"))?,
            None => false,
        };
        if dev_bypass && app_env.is_production() {
            return Err(ConfigError::Invalid("AUTH_DEV_BYPASS"));
        }

        let bootstrap_admin = match (
            non_empty("BOOTSTRAP_ADMIN_EMAIL"),
            non_empty("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("BOOTSTRAP_ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("BOOTSTRAP_ADMIN_EMAIL")),
        };

        let http_timeout = Duration::from_secs(parse_or(
            "HTTP_TIMEOUT_SECONDS",
            non_empty("HTTP_TIMEOUT_SECONDS"),
            30,
        )?);
        let http_body_limit_bytes = parse_or(
            "HTTP_BODY_LIMIT_BYTES",
            non_empty("HTTP_BODY_LIMIT_BYTES"),
            1024 * 1024,
        )?;

        Ok(Self {
            addr,
            app_env,
            database_url,
            cors_allowed_origins,
            auth: AuthSettings {
                jwt_secret,
                token_ttl_seconds,
                leeway_seconds,
                dev_bypass,
            },
            bootstrap_admin,
            http_timeout,
            http_body_limit_bytes,
        })
    }

    pub fn uses_insecure_jwt_secret(&self) -> bool {
        self.auth.uses_insecure_default()
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
