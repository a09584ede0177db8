// src/lib.rs
//! Provision service-account credentials into env files.
//!
//! Each configured account gets a username/password pair, typed by an
//! operator or generated. Operator passwords must pass a local length rule
//! and a k-anonymity lookup against a breached-password range service before
//! they are written out as `<ID>_USER=` / `<ID>_PASS=` lines.

use std::path::Path;

pub mod breach;
pub mod cli;
pub mod core;
pub mod exit;
pub mod generators;
pub mod logging;
pub mod models;
pub mod output;
pub mod provision;

pub use crate::breach::{BreachError, BreachOracle, HttpBreachOracle};
pub use crate::core::{Config, ConfigError, StrengthChecker, StrengthPolicy, Verdict};
pub use crate::models::{Account, Credential, CredentialMode, ProvisionedAccount};
pub use crate::output::{EnvFileWriter, WriteReport};
pub use crate::provision::{ProvisionError, Provisioner};

// One full batch: resolve every account, then write all targets.
// Nothing is written unless every account was provisioned.
pub fn run_batch<O, P>(
    config: &Config,
    accounts: &[Account],
    global_output: Option<&Path>,
    mode: CredentialMode,
    oracle: O,
    prompter: P,
) -> Result<WriteReport, ProvisionError>
where
    O: BreachOracle,
    P: cli::Prompter,
{
    let checker = StrengthChecker::new(StrengthPolicy::from_config(config), oracle);
    let mut provisioner = Provisioner::new(checker, prompter, mode).with_max_attempts(config.max_password_attempts);

    let provisioned = provisioner.run(accounts)?;

    let writer = EnvFileWriter::from_config(config);
    Ok(writer.write_all(&provisioned, global_output))
}
