use interviewer_core::InterviewError;
use interviewer_core::llm_client::GatewaySettings;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

impl From<ConfigError> for InterviewError {
    fn from(err: ConfigError) -> Self {
        InterviewError::Configuration(err.to_string())
    }
}

/// The supported model backends, all reached through their OpenAI-compatible endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
    Gemini,
}

impl Provider {
    pub fn api_base(&self) -> &'static str {
        match self {
            Provider::Anthropic => "https://api.anthropic.com/v1/",
            Provider::OpenAI => "https://api.openai.com/v1/",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Anthropic => "claude-3-7-sonnet-20250219",
            Provider::OpenAI => "gpt-4o",
            Provider::Gemini => "gemini-2.0-flash",
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub provider: Provider,
    pub api_key: String,
    pub chat_model: String,
    pub max_tokens: u32,
    pub request_timeout: Option<Duration>,
    pub log_level: Level,
    pub prompts_path: Option<PathBuf>,
    pub verbose_logging: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let provider_str = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "anthropic".to_string());
        let provider = match provider_str.to_lowercase().as_str() {
            "anthropic" => Provider::Anthropic,
            "openai" => Provider::OpenAI,
            "gemini" => Provider::Gemini,
            other => {
                return Err(ConfigError::InvalidValue(
                    "LLM_PROVIDER".to_string(),
                    format!("'{}' is not a supported provider", other),
                ));
            }
        };

        let api_key = std::env::var(provider.api_key_var())
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::MissingVar(format!(
                    "{} must be set for '{}' provider",
                    provider.api_key_var(),
                    provider_str.to_lowercase()
                ))
            })?;

        let chat_model =
            std::env::var("CHAT_MODEL").unwrap_or_else(|_| provider.default_model().to_string());

        let max_tokens = match std::env::var("MAX_TOKENS") {
            Ok(value) => value.parse::<u32>().map_err(|e| {
                ConfigError::InvalidValue("MAX_TOKENS".to_string(), e.to_string())
            })?,
            Err(_) => 1024,
        };

        let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => Some(Duration::from_secs(value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
            })?)),
            Err(_) => None,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH").ok().map(PathBuf::from);

        let verbose_logging = std::env::var("DEBUG")
            .map(|value| matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            provider,
            api_key,
            chat_model,
            max_tokens,
            request_timeout,
            log_level,
            prompts_path,
            verbose_logging,
        })
    }

    /// Settings for the model gateway derived from this configuration.
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            api_base: self.provider.api_base().to_string(),
            api_key: Some(self.api_key.clone()),
            model: self.chat_model.clone(),
            max_tokens: self.max_tokens,
            timeout: self.request_timeout,
            verbose_logging: self.verbose_logging,
        }
    }
}
