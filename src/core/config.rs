// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use log::LevelFilter;

use crate::models::{KeyStyle, WriteMode};

pub const DEFAULT_BREACH_API_URL: &str = "https://api.pwnedpasswords.com/range/";
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 10;

// Run-wide settings for a provisioning batch
#[derive(Debug, Clone)]
pub struct Config {
    // Password policy
    pub min_password_length: usize,
    pub reject_spaces: bool,

    // Interactive loop
    pub max_password_attempts: Option<usize>,

    // Output
    pub key_style: KeyStyle,
    pub export_prefix: bool,
    pub write_mode: WriteMode,

    // Breach oracle
    pub breach_api_url: String,
    pub breach_timeout: Option<Duration>,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            reject_spaces: true,

            max_password_attempts: None,

            key_style: KeyStyle::Short,
            export_prefix: false,
            write_mode: WriteMode::Overwrite,

            breach_api_url: DEFAULT_BREACH_API_URL.to_string(),
            breach_timeout: None,

            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl Config {
    // Load configuration from environment variables.
    // Runs before logging is set up, so rejected values come back as warnings
    // for the caller to log once the logger exists.
    pub fn load() -> (Self, Vec<String>) {
        let mut config = Config::default();
        let mut warnings = Vec::new();

        // Password policy
        if let Ok(val) = env::var("MIN_PASSWORD_LENGTH") {
            match val.parse() {
                Ok(length) => config.min_password_length = length,
                Err(_) => warnings.push(format!(
                    "Invalid MIN_PASSWORD_LENGTH '{}', using {}",
                    val, config.min_password_length
                )),
            }
        }

        if let Ok(val) = env::var("REJECT_SPACES") {
            match val.parse() {
                Ok(reject) => config.reject_spaces = reject,
                Err(_) => warnings.push(format!("Invalid REJECT_SPACES '{}', using {}", val, config.reject_spaces)),
            }
        }

        if let Ok(val) = env::var("MAX_PASSWORD_ATTEMPTS") {
            match val.parse::<usize>() {
                Ok(attempts) => config.max_password_attempts = if attempts == 0 { None } else { Some(attempts) },
                Err(_) => warnings.push(format!("Invalid MAX_PASSWORD_ATTEMPTS '{}', retrying without limit", val)),
            }
        }

        // Output
        if let Ok(style) = env::var("KEY_STYLE") {
            match style.to_lowercase().as_str() {
                "short" => config.key_style = KeyStyle::Short,
                "long" => config.key_style = KeyStyle::Long,
                _ => warnings.push(format!("Unknown key style '{}', using short", style)),
            }
        }

        if let Ok(val) = env::var("EXPORT_PREFIX") {
            match val.parse() {
                Ok(export) => config.export_prefix = export,
                Err(_) => warnings.push(format!("Invalid EXPORT_PREFIX '{}', using {}", val, config.export_prefix)),
            }
        }

        if let Ok(mode) = env::var("WRITE_MODE") {
            match mode.to_lowercase().as_str() {
                "overwrite" => config.write_mode = WriteMode::Overwrite,
                "append" => config.write_mode = WriteMode::Append,
                _ => warnings.push(format!("Unknown write mode '{}', using overwrite", mode)),
            }
        }

        // Breach oracle
        if let Ok(url) = env::var("BREACH_API_URL") {
            if !url.trim().is_empty() {
                config.breach_api_url = url;
            }
        }

        if let Ok(val) = env::var("BREACH_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(0) => config.breach_timeout = None,
                Ok(secs) => config.breach_timeout = Some(Duration::from_secs(secs)),
                Err(_) => warnings.push(format!("Invalid BREACH_TIMEOUT_SECS '{}', no timeout applied", val)),
            }
        }

        // Logging
        if let Ok(level) = env::var("LOG_LEVEL") {
            match parse_level(&level) {
                Some(parsed) => config.log_level = parsed,
                None => warnings.push(format!("Unknown log level '{}', using {}", level, config.log_level)),
            }
        }

        if let Ok(file) = env::var("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        (config, warnings)
    }
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}
