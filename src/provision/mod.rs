// src/provision/mod.rs
//! Drives every configured account to an accepted credential.
//!
//! Accounts are handled strictly one after another. In interactive mode the
//! operator is asked again until the strength checker accepts the password;
//! in autofill mode a random credential is generated and used as is.

use thiserror::Error;

use crate::breach::{BreachError, BreachOracle};
use crate::cli::prompt::{PromptError, Prompter};
use crate::core::strength::{StrengthChecker, Verdict};
use crate::generators::PasswordGenerator;
use crate::models::{Account, Credential, CredentialMode, ProvisionedAccount};

pub const EMPTY_USERNAME_MESSAGE: &str = "The username should not be empty.";
pub const WEAK_PASSWORD_MESSAGE: &str = "The password is not strong enough. Please try again.";
pub const DONE_MESSAGE: &str = "[OK]";

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Breach check failed: {0}")]
    Breach(#[from] BreachError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("Gave up on account '{account}' after {attempts} rejected passwords")]
    TooManyAttempts { account: String, attempts: usize },
}

pub type Result<T> = std::result::Result<T, ProvisionError>;

pub struct Provisioner<O, P> {
    checker: StrengthChecker<O>,
    prompter: P,
    generator: PasswordGenerator,
    mode: CredentialMode,
    max_attempts: Option<usize>,
}

impl<O: BreachOracle, P: Prompter> Provisioner<O, P> {
    pub fn new(checker: StrengthChecker<O>, prompter: P, mode: CredentialMode) -> Self {
        Self {
            checker,
            prompter,
            generator: PasswordGenerator::new(),
            mode,
            max_attempts: None,
        }
    }

    // None (or zero) keeps retrying until the operator gets it right
    pub fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts.filter(|n| *n > 0);
        self
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    // Accounts are resolved in order; the first hard error stops the batch
    pub fn run(&mut self, accounts: &[Account]) -> Result<Vec<ProvisionedAccount>> {
        let mut provisioned = Vec::with_capacity(accounts.len());

        for account in accounts {
            let credential = self.provision_account(account)?;
            provisioned.push(ProvisionedAccount {
                account: account.clone(),
                credential,
            });
        }

        log::info!("Provisioned {} account(s)", provisioned.len());
        Ok(provisioned)
    }

    pub fn provision_account(&mut self, account: &Account) -> Result<Credential> {
        self.prompter.say(&account.description);

        let credential = match self.mode {
            CredentialMode::Interactive => self.prompt_for_credential(account)?,
            CredentialMode::Autofill => self.generator.autofill(account),
        };

        self.prompter.say(DONE_MESSAGE);
        self.prompter.say("");
        log::info!("Account {} provisioned as '{}'", account.id, credential.username);

        Ok(credential)
    }

    fn prompt_for_credential(&mut self, account: &Account) -> Result<Credential> {
        let default = account.default_username.as_deref();

        let mut username = self.prompter.username(" username:", default)?;
        while username.trim().is_empty() {
            self.prompter.say(EMPTY_USERNAME_MESSAGE);
            username = self.prompter.username(" username:", default)?;
        }

        let mut rejected = 0;
        loop {
            let password = self.prompter.password(" password:")?;

            match self.checker.check(&password)? {
                Verdict::Accepted => {
                    return Ok(Credential { username, password });
                }
                Verdict::Rejected(reason) => {
                    rejected += 1;
                    log::debug!("Password for {} rejected: {}", account.id, reason);

                    if let Some(max) = self.max_attempts {
                        if rejected >= max {
                            return Err(ProvisionError::TooManyAttempts {
                                account: account.id.clone(),
                                attempts: rejected,
                            });
                        }
                    }

                    self.prompter.say(WEAK_PASSWORD_MESSAGE);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breach::testing::StubOracle;
    use crate::cli::prompt::testing::ScriptedPrompter;
    use crate::core::strength::StrengthPolicy;

    const POLICY: StrengthPolicy = StrengthPolicy {
        min_length: 10,
        reject_spaces: true,
    };

    fn interactive(
        oracle: StubOracle,
        usernames: &[&str],
        passwords: &[&str],
    ) -> Provisioner<StubOracle, ScriptedPrompter> {
        Provisioner::new(
            StrengthChecker::new(POLICY, oracle),
            ScriptedPrompter::new(usernames, passwords),
            CredentialMode::Interactive,
        )
    }

    #[test]
    fn test_interactive_retries_until_accepted() {
        let oracle = StubOracle::breached(&["password123"]);
        let mut provisioner = interactive(
            oracle,
            &["", "   ", "operator"],
            &["short", "has a space in it", "password123", "Xq7-vBn4!pLm"],
        );

        let credential = provisioner.provision_account(&Account::new("DB", "Database")).unwrap();
        assert_eq!(credential.username, "operator");
        assert_eq!(credential.password, "Xq7-vBn4!pLm");

        let prompter = provisioner.prompter();
        assert_eq!(prompter.password_prompts, 4);
        let weak = prompter.output.iter().filter(|l| *l == WEAK_PASSWORD_MESSAGE).count();
        let empty = prompter.output.iter().filter(|l| *l == EMPTY_USERNAME_MESSAGE).count();
        assert_eq!(weak, 3);
        assert_eq!(empty, 2);
        assert_eq!(prompter.output.first().map(String::as_str), Some("Database"));
        assert!(prompter.output.iter().any(|l| l == DONE_MESSAGE));
    }

    #[test]
    fn test_default_username_is_offered() {
        let mut account = Account::new("WEB", "Web");
        account.default_username = Some("www".into());

        let mut provisioner = interactive(StubOracle::returning(&[]), &["www"], &["Xq7-vBn4!pLm"]);
        provisioner.provision_account(&account).unwrap();
        assert_eq!(provisioner.prompter().username_defaults, vec![Some("www".to_string())]);
    }

    #[test]
    fn test_oracle_error_aborts_account() {
        let mut provisioner = interactive(
            StubOracle::failing(400, "rate limited"),
            &["operator"],
            &["Xq7-vBn4!pLm", "another-good-one"],
        );

        match provisioner.provision_account(&Account::new("DB", "Database")) {
            Err(ProvisionError::Breach(e)) => assert_eq!(e.to_string(), "rate limited"),
            other => panic!("Expected breach error, got {:?}", other),
        }
        // Never fell through to asking again
        assert_eq!(provisioner.prompter().password_prompts, 1);
    }

    #[test]
    fn test_max_attempts_stops_retrying() {
        let mut provisioner = interactive(StubOracle::returning(&[]), &["operator"], &["a", "b", "c", "d"])
            .with_max_attempts(Some(3));

        match provisioner.provision_account(&Account::new("DB", "Database")) {
            Err(ProvisionError::TooManyAttempts { account, attempts }) => {
                assert_eq!(account, "DB");
                assert_eq!(attempts, 3);
            }
            other => panic!("Expected TooManyAttempts, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupted_prompt_propagates() {
        let mut provisioner = interactive(StubOracle::returning(&[]), &["operator"], &["short"]);
        assert!(matches!(
            provisioner.provision_account(&Account::new("DB", "Database")),
            Err(ProvisionError::Prompt(PromptError::Interrupted))
        ));
    }

    #[test]
    fn test_autofill_skips_prompts_and_oracle() {
        let oracle = StubOracle::failing(500, "must not be called");
        let mut provisioner = Provisioner::new(
            StrengthChecker::new(POLICY, &oracle),
            ScriptedPrompter::default(),
            CredentialMode::Autofill,
        );

        let accounts = vec![Account::new("A", "first"), Account::new("Broker", "second")];
        let provisioned = provisioner.run(&accounts).unwrap();

        assert_eq!(provisioned.len(), 2);
        assert_eq!(provisioned[0].credential.username, "a");
        assert_eq!(provisioned[1].credential.username, "broker");
        assert_eq!(provisioned[0].credential.password.len(), 32);
        assert!(oracle.queries.borrow().is_empty());
        assert_eq!(provisioner.prompter().password_prompts, 0);
    }

    #[test]
    fn test_run_keeps_configuration_order() {
        let mut provisioner = interactive(
            StubOracle::returning(&[]),
            &["second-user", "first-user"],
            &["Xq7-vBn4!pLm", "Zr8-wCo5?qMn"],
        );
        let accounts = vec![Account::new("Z", "z"), Account::new("A", "a")];

        let provisioned = provisioner.run(&accounts).unwrap();
        assert_eq!(provisioned[0].account.id, "Z");
        assert_eq!(provisioned[0].credential.username, "second-user");
        assert_eq!(provisioned[1].account.id, "A");
        assert_eq!(provisioned[1].credential.password, "Zr8-wCo5?qMn");
    }
}
