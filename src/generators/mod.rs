pub mod password;

pub use password::PasswordGenerator;
