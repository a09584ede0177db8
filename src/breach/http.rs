// src/breach/http.rs
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::{parse_range_body, BreachError, BreachOracle, Result};

const USER_AGENT: &str = concat!("credprov/", env!("CARGO_PKG_VERSION"));

// Blocking client for the Pwned Passwords range API. One request per check, no retries.
pub struct HttpBreachOracle {
    client: Client,
    base_url: String,
}

impl HttpBreachOracle {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn url_for(&self, prefix: &str) -> String {
        format!("{}{}", self.base_url, prefix)
    }
}

impl BreachOracle for HttpBreachOracle {
    fn range(&self, prefix: &str) -> Result<Vec<String>> {
        let response = self.client.get(self.url_for(prefix)).send()?;
        let status = response.status();
        let body = response.text()?;

        if status != StatusCode::OK {
            log::error!("Breach oracle answered {} for prefix {}", status, prefix);
            return Err(BreachError::Oracle {
                status: status.as_u16(),
                body,
            });
        }

        Ok(parse_range_body(&body))
    }
}
