use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const SCRYFALL_HOST: &str = "https://api.scryfall.com";
pub const ALPHA_VANTAGE_HOST: &str = "https://www.alphavantage.co";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub trait ClientConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Read an optional environment variable. Unset and blank both yield `default`.
    fn get_env(key: &str, default: Option<String>) -> Result<Option<String>> {
        match env::var(key) {
            Ok(value) if value.trim().is_empty() => Ok(default),
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(default),
            Err(e) => Err(anyhow!("Environment variable '{}' is unreadable: {}", key, e)),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("Environment variable '{}' must be a number, got '{}'", key, raw)),
        None => Ok(default),
    }
}

fn validate_url(key: &str, value: &str) -> Result<()> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| anyhow!("Environment variable '{}' is not a valid URL: {}", key, e))
}

/// Settings shared by every outbound HTTP client
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    pub request_delay: Duration,
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("augur/{}", env!("CARGO_PKG_VERSION")),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig for HttpConfig {
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let user_agent = Self::get_env("AUGUR_USER_AGENT", None)?.unwrap_or(defaults.user_agent);
        let delay_ms = parse_number(
            "AUGUR_REQUEST_DELAY_MS",
            Self::get_env("AUGUR_REQUEST_DELAY_MS", None)?,
            DEFAULT_REQUEST_DELAY_MS,
        )?;
        let timeout_secs = parse_number(
            "AUGUR_TIMEOUT_SECS",
            Self::get_env("AUGUR_TIMEOUT_SECS", None)?,
            DEFAULT_TIMEOUT_SECS,
        )?;

        Ok(Self {
            user_agent,
            request_delay: Duration::from_millis(delay_ms),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScryfallConfig {
    pub host: String,
}

impl Default for ScryfallConfig {
    fn default() -> Self {
        Self {
            host: SCRYFALL_HOST.to_string(),
        }
    }
}

impl ClientConfig for ScryfallConfig {
    fn from_env() -> Result<Self> {
        let host = Self::get_env("SCRYFALL_HOST", Some(SCRYFALL_HOST.to_string()))?
            .unwrap_or_else(|| SCRYFALL_HOST.to_string());
        validate_url("SCRYFALL_HOST", &host)?;
        Ok(Self { host })
    }
}

/// The API key is optional: an unset key is still sent (empty) so the provider's
/// own error reaches the caller.
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    pub host: String,
    pub api_key: Option<String>,
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self {
            host: ALPHA_VANTAGE_HOST.to_string(),
            api_key: None,
        }
    }
}

impl ClientConfig for AlphaVantageConfig {
    fn from_env() -> Result<Self> {
        let host = Self::get_env("ALPHA_VANTAGE_HOST", Some(ALPHA_VANTAGE_HOST.to_string()))?
            .unwrap_or_else(|| ALPHA_VANTAGE_HOST.to_string());
        validate_url("ALPHA_VANTAGE_HOST", &host)?;

        let api_key = Self::get_env("ALPHA_VANTAGE_API_KEY", None)?;

        Ok(Self { host, api_key })
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoogleChatConfig {
    pub webhook_url: Option<String>,
}

impl ClientConfig for GoogleChatConfig {
    fn from_env() -> Result<Self> {
        let webhook_url = Self::get_env("GOOGLE_CHAT_WEBHOOK_URL", None)?;
        if let Some(url) = &webhook_url {
            validate_url("GOOGLE_CHAT_WEBHOOK_URL", url)?;
        }
        Ok(Self { webhook_url })
    }
}

/// Everything the tool clients and agents need, read once at start-up.
#[derive(Debug, Clone)]
pub struct Settings {
    pub model: String,
    pub http: HttpConfig,
    pub scryfall: ScryfallConfig,
    pub alpha_vantage: AlphaVantageConfig,
    pub google_chat: GoogleChatConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            http: HttpConfig::default(),
            scryfall: ScryfallConfig::default(),
            alpha_vantage: AlphaVantageConfig::default(),
            google_chat: GoogleChatConfig::default(),
        }
    }
}

impl ClientConfig for Settings {
    fn from_env() -> Result<Self> {
        let model = Self::get_env("AUGUR_MODEL", Some(DEFAULT_MODEL.to_string()))?
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let settings = Self {
            model,
            http: HttpConfig::from_env()?,
            scryfall: ScryfallConfig::from_env()?,
            alpha_vantage: AlphaVantageConfig::from_env()?,
            google_chat: GoogleChatConfig::from_env()?,
        };

        tracing::debug!(
            model = %settings.model,
            alpha_vantage_key = settings.alpha_vantage.api_key.is_some(),
            google_chat_webhook = settings.google_chat.webhook_url.is_some(),
            "loaded settings"
        );

        Ok(settings)
    }
}
