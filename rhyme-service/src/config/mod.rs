use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TEMPERATURE: f32 = 1.0;
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_RAPIDAPI_HOST: &str = "wordsapiv1.p.rapidapi.com";
const DEFAULT_WORDS_API_BASE: &str = "https://wordsapiv1.p.rapidapi.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct RhymeConfig {
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub google: GoogleConfig,
    pub words_api: WordsApiConfig,
    pub http_client: HttpClientConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Gemini model used for word generation (e.g., gemini-2.5-flash)
    pub text_model: String,
    /// Sampling temperature; kept high so repeated calls vary.
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
    pub api_base_url: String,
}

/// RapidAPI credentials for WordsAPI.
#[derive(Debug, Clone)]
pub struct WordsApiConfig {
    pub api_key: String,
    pub host: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout_secs: u64,
}

impl HttpClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RhymeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(RhymeConfig {
            common: common_config,
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
                temperature: parse_env(
                    "GENAI_TEMPERATURE",
                    &DEFAULT_TEMPERATURE.to_string(),
                    is_prod,
                )?,
            },
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
                api_base_url: get_env(
                    "GEMINI_API_BASE_URL",
                    Some(DEFAULT_GEMINI_API_BASE),
                    is_prod,
                )?,
            },
            words_api: WordsApiConfig {
                api_key: get_env("RAPIDAPI_KEY", None, is_prod)?,
                host: get_env("RAPIDAPI_HOST", Some(DEFAULT_RAPIDAPI_HOST), is_prod)?,
                base_url: get_env("WORDS_API_BASE_URL", Some(DEFAULT_WORDS_API_BASE), is_prod)?,
            },
            http_client: HttpClientConfig {
                timeout_secs: parse_env(
                    "HTTP_CLIENT_TIMEOUT_SECS",
                    &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
                    is_prod,
                )?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, default: &str, is_prod: bool) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(key, Some(default), is_prod)?;
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}
