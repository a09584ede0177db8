// src/exit.rs
//! Process exit codes for each way a run can fail.

use crate::cli::PromptError;
use crate::core::ConfigError;
use crate::provision::ProvisionError;

pub const CONFIG_NOT_FOUND: u8 = 1;
pub const CONFIG_INVALID: u8 = 2;
pub const NO_OUTPUT: u8 = 3;
pub const BREACH_CHECK: u8 = 4;
pub const PROMPT: u8 = 5;
// 128 + SIGINT, as a shell reports it
pub const INTERRUPTED: u8 = 130;

pub fn for_config_error(error: &ConfigError) -> u8 {
    match error {
        ConfigError::NotFound(_) => CONFIG_NOT_FOUND,
        ConfigError::MissingOutput(_) => NO_OUTPUT,
        ConfigError::Io(_) | ConfigError::Parse(_) | ConfigError::Empty | ConfigError::InvalidEntry { .. } => {
            CONFIG_INVALID
        }
    }
}

pub fn for_provision_error(error: &ProvisionError) -> u8 {
    match error {
        ProvisionError::Breach(_) => BREACH_CHECK,
        ProvisionError::Prompt(PromptError::Interrupted) => INTERRUPTED,
        ProvisionError::Prompt(_) | ProvisionError::TooManyAttempts { .. } => PROMPT,
    }
}
