//! Process-wide settings, resolved once at startup.
//!
//! Values come from the environment, with a `.env` file loaded first when present.

use crate::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 2000;
pub const DEFAULT_FAQ_CACHE: &str = "medical_faqs.json";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown LOG_FORMAT '{}'", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Chat-completion API key. `None` puts the model router in fallback mode.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Upper bound on free-text input accepted by the request handlers.
    pub max_input_length: usize,
    pub faq_cache_path: PathBuf,
    /// `DEBUG=true` raises the log level to `debug` whatever `LOG_LEVEL` says.
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            faq_cache_path: PathBuf::from(DEFAULT_FAQ_CACHE),
            debug: false,
        }
    }
}

impl Settings {
    /// Loads `.env` (if any) and then reads the environment.
    pub fn load() -> Result<Self, AppError> {
        // A missing .env file is the normal case in production.
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads settings from the current process environment only.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Settings::default();

        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            openai_api_key,
            openai_model: string_var("OPENAI_MODEL", defaults.openai_model),
            openai_base_url: string_var("OPENAI_BASE_URL", defaults.openai_base_url)
                .trim_end_matches('/')
                .to_string(),
            host: string_var("HOST", defaults.host),
            port: parsed_var("PORT", defaults.port)?,
            log_level: string_var("LOG_LEVEL", defaults.log_level).to_lowercase(),
            log_format: match env::var("LOG_FORMAT") {
                Ok(raw) => raw.parse()?,
                Err(_) => defaults.log_format,
            },
            max_input_length: parsed_var("MAX_INPUT_LENGTH", defaults.max_input_length)?,
            faq_cache_path: env::var("FAQ_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.faq_cache_path),
            debug: env::var("DEBUG")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        })
    }

    pub fn model_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Level used for the default tracing filter.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn string_var(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn parsed_var<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: '{}'", key, raw))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 10] = [
        "OPENAI_API_KEY",
        "OPENAI_MODEL",
        "OPENAI_BASE_URL",
        "HOST",
        "PORT",
        "LOG_LEVEL",
        "LOG_FORMAT",
        "MAX_INPUT_LENGTH",
        "FAQ_CACHE_PATH",
        "DEBUG",
    ];

    /// Every known key unset, except the given overrides.
    fn env_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
        KEYS.iter()
            .map(|k| {
                let value = overrides.iter().find(|(key, _)| key == k).map(|(_, v)| *v);
                (*k, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults_without_environment() {
        temp_env::with_vars(env_with(&[]), || {
            let settings = Settings::from_env().unwrap();
            assert!(settings.openai_api_key.is_none());
            assert!(!settings.model_configured());
            assert_eq!(settings.openai_model, "gpt-4o");
            assert_eq!(settings.port, 8000);
            assert_eq!(settings.max_input_length, 2000);
            assert_eq!(settings.log_format, LogFormat::Pretty);
            assert_eq!(settings.faq_cache_path, PathBuf::from("medical_faqs.json"));
            assert_eq!(settings.effective_log_level(), "info");
        });
    }

    #[test]
    fn test_debug_flag_raises_log_level() {
        let vars = env_with(&[("LOG_LEVEL", "WARN"), ("DEBUG", "1")]);
        temp_env::with_vars(vars, || {
            let settings = Settings::from_env().unwrap();
            assert!(settings.debug);
            assert_eq!(settings.log_level, "warn");
            assert_eq!(settings.effective_log_level(), "debug");
        });
    }

    #[test]
    fn test_reads_overrides() {
        let vars = env_with(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:9999/v1/"),
            ("PORT", "9100"),
            ("LOG_FORMAT", "json"),
            ("MAX_INPUT_LENGTH", "500"),
        ]);
        temp_env::with_vars(vars, || {
            let settings = Settings::from_env().unwrap();
            assert_eq!(settings.openai_api_key.as_deref(), Some("sk-test"));
            assert_eq!(settings.openai_base_url, "http://localhost:9999/v1");
            assert_eq!(settings.port, 9100);
            assert_eq!(settings.log_format, LogFormat::Json);
            assert_eq!(settings.max_input_length, 500);
            assert_eq!(settings.bind_address(), "0.0.0.0:9100");
        });
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let vars = env_with(&[("OPENAI_API_KEY", "   ")]);
        temp_env::with_vars(vars, || {
            let settings = Settings::from_env().unwrap();
            assert!(!settings.model_configured());
        });
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let vars = env_with(&[("PORT", "eighty")]);
        temp_env::with_vars(vars, || {
            let result = Settings::from_env();
            assert!(matches!(result, Err(AppError::Config(_))));
        });
    }
}
