// src/breach/mod.rs
//! k-anonymity lookups against a breached-password range service.
//!
//! Only the first five hex characters of the password's SHA-1 digest ever
//! leave the process; the returned candidate suffixes are matched locally.

use sha1::{Digest, Sha1};
use thiserror::Error;

pub mod http;

pub use http::HttpBreachOracle;

pub const PREFIX_LEN: usize = 5;
pub const SUFFIX_LEN: usize = 35;

#[derive(Debug, Error)]
pub enum BreachError {
    /// The oracle answered with something other than 200; the message is its raw body
    #[error("{body}")]
    Oracle { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BreachError>;

// Anything that can return the breached suffixes for a 5-character prefix
pub trait BreachOracle {
    fn range(&self, prefix: &str) -> Result<Vec<String>>;
}

impl<O: BreachOracle + ?Sized> BreachOracle for &O {
    fn range(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).range(prefix)
    }
}

impl<O: BreachOracle + ?Sized> BreachOracle for Box<O> {
    fn range(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).range(prefix)
    }
}

/// SHA-1 of the UTF-8 password as 40 upper-case hex characters.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(password.as_bytes());
    hex::encode_upper(hasher.finalize())
}

/// Split a digest into its 5-character prefix and 35-character remainder.
pub fn split_hash(hash: &str) -> (&str, &str) {
    hash.split_at(PREFIX_LEN)
}

// Response bodies use CRLF in practice, but plain LF is accepted too
pub fn parse_range_body(body: &str) -> Vec<String> {
    body.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub fn password_has_been_pwned<O: BreachOracle + ?Sized>(oracle: &O, password: &str) -> Result<bool> {
    let digest = hash_password(password);
    let (prefix, _) = split_hash(&digest);

    log::debug!("Querying breach range for prefix {}", prefix);
    let candidates = oracle.range(prefix)?;
    log::debug!("Breach range for {} returned {} candidates", prefix, candidates.len());

    let pwned = candidates.iter().any(|line| {
        let suffix: String = line.chars().take(SUFFIX_LEN).collect();
        let full = format!("{}{}", prefix, suffix);
        full.eq_ignore_ascii_case(&digest)
    });

    Ok(pwned)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    // Canned oracle that records the prefixes it was asked for
    pub struct StubOracle {
        pub response: std::result::Result<Vec<String>, (u16, String)>,
        pub queries: RefCell<Vec<String>>,
    }

    impl StubOracle {
        pub fn returning(lines: &[&str]) -> Self {
            Self {
                response: Ok(lines.iter().map(|l| l.to_string()).collect()),
                queries: RefCell::new(Vec::new()),
            }
        }

        pub fn failing(status: u16, body: &str) -> Self {
            Self {
                response: Err((status, body.to_string())),
                queries: RefCell::new(Vec::new()),
            }
        }

        // Reports every password in `breached` as pwned
        pub fn breached(breached: &[&str]) -> Self {
            let lines = breached
                .iter()
                .map(|p| format!("{}:1", &hash_password(p)[PREFIX_LEN..]))
                .collect();
            Self {
                response: Ok(lines),
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl BreachOracle for StubOracle {
        fn range(&self, prefix: &str) -> Result<Vec<String>> {
            self.queries.borrow_mut().push(prefix.to_string());
            match &self.response {
                Ok(lines) => Ok(lines.clone()),
                Err((status, body)) => Err(BreachError::Oracle {
                    status: *status,
                    body: body.clone(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubOracle;
    use super::*;

    #[test]
    fn test_hash_password_is_upper_hex_sha1() {
        assert_eq!(hash_password("password"), "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8");
        assert_eq!(hash_password("").len(), 40);
    }

    #[test]
    fn test_split_hash() {
        let digest = hash_password("password");
        let (prefix, rest) = split_hash(&digest);
        assert_eq!(prefix, "5BAA6");
        assert_eq!(rest.len(), SUFFIX_LEN);
    }

    #[test]
    fn test_parse_range_body_splits_real_newlines() {
        let body = "hash1\r\nhash2\r\nhash3\nhash4\r\n";
        assert_eq!(parse_range_body(body), vec!["hash1", "hash2", "hash3", "hash4"]);
        assert!(parse_range_body("").is_empty());
    }

    #[test]
    fn test_pwned_when_suffix_returned() {
        let digest = hash_password("password");
        let line = format!("{}:1", &digest[PREFIX_LEN..]);
        let oracle = StubOracle::returning(&["0000000000000000000000000000000000A:3", &line]);

        assert!(password_has_been_pwned(&oracle, "password").unwrap());
        assert_eq!(oracle.queries.borrow().as_slice(), ["5BAA6"]);
    }

    #[test]
    fn test_not_pwned_for_unrelated_suffixes() {
        let oracle = StubOracle::returning(&[
            "0018A45C4D1DEF81644B54AB7F969B88D65:1",
            "00D4F6E8FA6EECAD2A3AA415EEC418D38EC:2",
            "0E10H5:1",
        ]);
        assert!(!password_has_been_pwned(&oracle, "correct horse battery staple").unwrap());
    }

    #[test]
    fn test_lowercase_suffix_still_matches() {
        let digest = hash_password("letmein");
        let line = format!("{}:42", digest[PREFIX_LEN..].to_lowercase());
        let oracle = StubOracle::returning(&[&line]);
        assert!(password_has_been_pwned(&oracle, "letmein").unwrap());
    }

    #[test]
    fn test_oracle_error_propagates_body() {
        let oracle = StubOracle::failing(400, "rate limited");
        let err = password_has_been_pwned(&oracle, "whatever").unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
        assert!(matches!(err, BreachError::Oracle { status: 400, .. }));
    }
}
