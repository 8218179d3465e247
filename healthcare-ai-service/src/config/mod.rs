use serde::Deserialize;
use service_core::config::{self as core_config, optional_env, parse_env};
use service_core::error::AppError;

/// Gemini REST endpoint used when `GEMINI_API_BASE` is not set.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_RISK_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Clone, Deserialize)]
pub struct HealthcareConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub prompts: PromptSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// Missing key is not fatal: the service starts and every generation
    /// endpoint answers with the "not configured" error.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptSettings {
    /// Sampling temperature for risk reports. Diet plans use the model default.
    pub risk_temperature: f32,
}

impl HealthcareConfig {
    pub fn load() -> Result<Self, AppError> {
        Ok(HealthcareConfig {
            common: core_config::Config::load()?,
            gemini: GeminiSettings {
                api_key: optional_env("GEMINI_API_KEY").or_else(|| optional_env("GOOGLE_API_KEY")),
                model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_base: optional_env("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
            prompts: PromptSettings {
                risk_temperature: parse_env("RISK_TEMPERATURE", DEFAULT_RISK_TEMPERATURE)?,
            },
        })
    }

    /// Configuration with defaults and no credential, for tests and tooling.
    pub fn unconfigured() -> Self {
        HealthcareConfig {
            common: core_config::Config { port: 0 },
            gemini: GeminiSettings {
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            prompts: PromptSettings {
                risk_temperature: DEFAULT_RISK_TEMPERATURE,
            },
        }
    }
}
