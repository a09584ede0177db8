// src/core/mod.rs
pub mod accounts;
pub mod config;
pub mod strength;

pub use accounts::{load_accounts, ConfigError};
pub use config::Config;
pub use strength::{Rejection, StrengthChecker, StrengthPolicy, Verdict};
