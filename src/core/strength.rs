// src/core/strength.rs
use std::fmt;

use crate::breach::{self, BreachOracle};
use crate::core::config::Config;

// Local rules, applied before the breach lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthPolicy {
    pub min_length: usize,
    pub reject_spaces: bool,
}

impl StrengthPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_length: config.min_password_length,
            reject_spaces: config.reject_spaces,
        }
    }

    // Length is counted in characters, not bytes
    pub fn local_rejection(&self, password: &str) -> Option<Rejection> {
        if self.reject_spaces && password.contains(' ') {
            return Some(Rejection::ContainsSpace);
        }

        let actual = password.chars().count();
        if actual < self.min_length {
            return Some(Rejection::TooShort {
                min: self.min_length,
                actual,
            });
        }

        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ContainsSpace,
    TooShort { min: usize, actual: usize },
    Breached,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::ContainsSpace => write!(f, "contains a space"),
            Rejection::TooShort { min, actual } => write!(f, "too short ({} < {})", actual, min),
            Rejection::Breached => write!(f, "found in breach database"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

pub struct StrengthChecker<O> {
    policy: StrengthPolicy,
    oracle: O,
}

impl<O: BreachOracle> StrengthChecker<O> {
    pub fn new(policy: StrengthPolicy, oracle: O) -> Self {
        Self { policy, oracle }
    }

    // Short-circuits: the oracle is only consulted once the local rules pass.
    // Oracle failures are returned as errors, never as an accepted verdict.
    pub fn check(&self, password: &str) -> breach::Result<Verdict> {
        if let Some(rejection) = self.policy.local_rejection(password) {
            return Ok(Verdict::Rejected(rejection));
        }

        if breach::password_has_been_pwned(&self.oracle, password)? {
            return Ok(Verdict::Rejected(Rejection::Breached));
        }

        Ok(Verdict::Accepted)
    }

    pub fn is_strong(&self, password: &str) -> breach::Result<bool> {
        Ok(self.check(password)?.is_accepted())
    }
}
