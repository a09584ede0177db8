// src/cli/mod.rs
use clap::Parser;
use std::path::PathBuf;

use crate::core::config::{parse_level, Config};
use crate::models::KeyStyle;

pub mod prompt;

pub use prompt::{InquirePrompter, PromptError, Prompter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The file containing the account data (JSON, or YAML by extension)
    #[arg(short = 'c', long = "config_file")]
    pub config_file: PathBuf,

    /// The file where usernames and passwords will be saved
    #[arg(short = 'o', long = "output_file")]
    pub output_file: Option<PathBuf>,

    /// Prompt for username and password instead of generating them
    #[arg(short = 'p', long)]
    pub prompt: bool,

    /// Minimum password length
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Accept passwords containing spaces
    #[arg(long)]
    pub allow_spaces: bool,

    /// Key naming convention for the output file
    #[arg(long, value_enum)]
    pub key_style: Option<KeyStyle>,

    /// Prefix every line with `export `
    #[arg(long)]
    pub export: bool,

    /// Append to output files instead of overwriting them
    #[arg(long)]
    pub append: bool,

    /// Base URL of the breached-password range API
    #[arg(long)]
    pub breach_url: Option<String>,

    /// Give up on an account after this many rejected passwords
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    // Flags given on the command line override the environment.
    // Returns warnings for flags that were ignored.
    pub fn apply(&self, config: &mut Config) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(min_length) = self.min_length {
            config.min_password_length = min_length;
        }
        if self.allow_spaces {
            config.reject_spaces = false;
        }
        if let Some(style) = self.key_style {
            config.key_style = style;
        }
        if self.export {
            config.export_prefix = true;
        }
        if self.append {
            config.write_mode = crate::models::WriteMode::Append;
        }
        if let Some(url) = &self.breach_url {
            config.breach_api_url = url.clone();
        }
        if let Some(max) = self.max_attempts {
            config.max_password_attempts = if max == 0 { None } else { Some(max) };
        }
        if let Some(level) = &self.log_level {
            match parse_level(level) {
                Some(parsed) => config.log_level = parsed,
                None => warnings.push(format!("Unknown log level '{}', keeping {}", level, config.log_level)),
            }
        }
        warnings
    }
}
