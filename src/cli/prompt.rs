// src/cli/prompt.rs
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt interrupted by operator")]
    Interrupted,

    #[error("Prompt failed: {0}")]
    Inquire(InquireError),
}

impl From<InquireError> for PromptError {
    fn from(error: InquireError) -> Self {
        match error {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => PromptError::Interrupted,
            other => PromptError::Inquire(other),
        }
    }
}

// Terminal seam for the interactive loop
pub trait Prompter {
    fn username(&mut self, message: &str, default: Option<&str>) -> Result<String, PromptError>;

    /// Read a password without echoing it
    fn password(&mut self, message: &str) -> Result<String, PromptError>;

    fn say(&mut self, line: &str);
}

pub struct InquirePrompter;

impl InquirePrompter {
    pub fn new() -> Self {
        InquirePrompter
    }
}

impl Default for InquirePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for InquirePrompter {
    fn username(&mut self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let mut prompt = Text::new(message);
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }
        Ok(prompt.prompt()?)
    }

    fn password(&mut self, message: &str) -> Result<String, PromptError> {
        Ok(Password::new(message)
            .with_display_mode(PasswordDisplayMode::Hidden)
            .without_confirmation()
            .prompt()?)
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    // Replays canned answers; runs out as if the operator hit Ctrl+C
    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub usernames: VecDeque<String>,
        pub passwords: VecDeque<String>,
        pub output: Vec<String>,
        pub username_defaults: Vec<Option<String>>,
        pub password_prompts: usize,
    }

    impl ScriptedPrompter {
        pub fn new(usernames: &[&str], passwords: &[&str]) -> Self {
            Self {
                usernames: usernames.iter().map(|s| s.to_string()).collect(),
                passwords: passwords.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn username(&mut self, _message: &str, default: Option<&str>) -> Result<String, PromptError> {
            self.username_defaults.push(default.map(String::from));
            self.usernames.pop_front().ok_or(PromptError::Interrupted)
        }

        fn password(&mut self, _message: &str) -> Result<String, PromptError> {
            self.password_prompts += 1;
            self.passwords.pop_front().ok_or(PromptError::Interrupted)
        }

        fn say(&mut self, line: &str) {
            self.output.push(line.to_string());
        }
    }
}
