use rand::rngs::OsRng;
use rand::RngCore;

use crate::models::{Account, Credential};

// Bytes of entropy in an autofilled password (128 bits)
pub const AUTOFILL_PASSWORD_BYTES: usize = 16;

pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    // 128 random bits from the OS, as 32 lowercase hex characters
    pub fn generate_password(&self) -> String {
        let mut bytes = [0u8; AUTOFILL_PASSWORD_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    // Fixed derivation; a configured default username only seeds the interactive prompt
    pub fn autofill_username(&self, account: &Account) -> String {
        account.id.to_lowercase()
    }

    pub fn autofill(&self, account: &Account) -> Credential {
        Credential {
            username: self.autofill_username(account),
            password: self.generate_password(),
        }
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}
