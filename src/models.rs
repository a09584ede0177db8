// src/models.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// A named service identity we provision credentials for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Stable key, used as the variable prefix in the env file
    pub id: String,
    pub description: String,
    pub default_username: Option<String>,
    /// Per-account targets; empty means "use the global output file"
    pub output_files: Vec<PathBuf>,
}

impl Account {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            default_username: None,
            output_files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

// An account together with the credential that was accepted for it
#[derive(Debug, Clone)]
pub struct ProvisionedAccount {
    pub account: Account,
    pub credential: Credential,
}

// Shape of one entry in the accounts document: either just a description
// or a record with the optional fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountEntry {
    Description(String),
    Detailed {
        description: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        output_files: Vec<PathBuf>,
    },
}

impl AccountEntry {
    pub fn into_account(self, id: &str) -> Account {
        match self {
            AccountEntry::Description(description) => Account::new(id, description),
            AccountEntry::Detailed {
                description,
                username,
                output_files,
            } => Account {
                id: id.to_string(),
                description,
                default_username: username.filter(|u| !u.trim().is_empty()),
                output_files,
            },
        }
    }
}

// Naming convention for the env-file keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyStyle {
    /// `<ID>_USER` / `<ID>_PASS`
    #[default]
    Short,
    /// `<ID>_USERNAME` / `<ID>_PASSWORD`
    Long,
}

impl KeyStyle {
    pub fn user_suffix(&self) -> &'static str {
        match self {
            KeyStyle::Short => "_USER",
            KeyStyle::Long => "_USERNAME",
        }
    }

    pub fn pass_suffix(&self) -> &'static str {
        match self {
            KeyStyle::Short => "_PASS",
            KeyStyle::Long => "_PASSWORD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Overwrite,
    Append,
}

// How credentials are obtained for the whole batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    Interactive,
    Autofill,
}
