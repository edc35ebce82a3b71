//! Credential handling.

mod password_hasher;

pub use password_hasher::PasswordHasher;
