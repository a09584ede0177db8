// src/core/accounts.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Account, AccountEntry};

// Legacy layout wraps the account map in a single top-level key.
// A lone USERS entry that is itself an account record stays an account.
const LEGACY_WRAPPER_KEY: &str = "USERS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config_file: {0} does not exist")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Error while loading config file: {0}")]
    Parse(String),

    #[error("No accounts configured")]
    Empty,

    #[error("Invalid entry for account '{id}': {reason}")]
    InvalidEntry { id: String, reason: String },

    #[error("No output file for account '{0}': pass --output_file or set output_files")]
    MissingOutput(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()) {
            Some(ext) if ext == "yaml" || ext == "yml" => Format::Yaml,
            _ => Format::Json,
        }
    }
}

// Load the ordered account list from a JSON or YAML file
pub fn load_accounts(path: &Path) -> Result<Vec<Account>> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    log::debug!("Read {} bytes of account config from {}", content.len(), path.display());

    parse_accounts(&content, Format::from_path(path))
}

fn parse_accounts(content: &str, format: Format) -> Result<Vec<Account>> {
    if content.trim().is_empty() {
        return Err(ConfigError::Empty);
    }

    let document: Value = match format {
        Format::Json => serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?,
        Format::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
            serde_json::to_value(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?
        }
    };

    accounts_from_value(document)
}

pub fn accounts_from_json(content: &str) -> Result<Vec<Account>> {
    parse_accounts(content, Format::Json)
}

pub fn accounts_from_yaml(content: &str) -> Result<Vec<Account>> {
    parse_accounts(content, Format::Yaml)
}

fn accounts_from_value(document: Value) -> Result<Vec<Account>> {
    let mut map = match document {
        Value::Null => return Err(ConfigError::Empty),
        Value::Object(map) => map,
        other => {
            return Err(ConfigError::Parse(format!(
                "expected a mapping of accounts, found {}",
                kind_of(&other)
            )))
        }
    };

    if map.len() == 1 && is_legacy_wrapper(map.get(LEGACY_WRAPPER_KEY)) {
        if let Some(Value::Object(inner)) = map.remove(LEGACY_WRAPPER_KEY) {
            map = inner;
        }
    }

    if map.is_empty() {
        return Err(ConfigError::Empty);
    }

    let mut accounts = Vec::with_capacity(map.len());
    for (id, raw) in map {
        if id.trim().is_empty() {
            return Err(ConfigError::InvalidEntry {
                id,
                reason: "account identifier is empty".into(),
            });
        }

        let entry: AccountEntry = serde_json::from_value(raw).map_err(|e| ConfigError::InvalidEntry {
            id: id.clone(),
            reason: e.to_string(),
        })?;

        accounts.push(entry.into_account(&id));
    }

    Ok(accounts)
}

fn is_legacy_wrapper(value: Option<&Value>) -> bool {
    match value {
        Some(inner @ Value::Object(_)) => AccountEntry::deserialize(inner).is_err(),
        _ => false,
    }
}

// Every account needs somewhere to go before we start asking for passwords
pub fn ensure_outputs(accounts: &[Account], global_output: Option<&Path>) -> Result<()> {
    if global_output.is_some() {
        return Ok(());
    }

    match accounts.iter().find(|a| a.output_files.is_empty()) {
        Some(account) => Err(ConfigError::MissingOutput(account.id.clone())),
        None => Ok(()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
