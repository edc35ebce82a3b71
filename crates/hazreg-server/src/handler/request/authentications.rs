//! Authentication request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login credentials.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Login email, matched case-insensitively.
    #[validate(email, length(max = 254))]
    pub email: String,
    /// Plaintext password, verified against the stored Argon2 hash.
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_email() {
        let login = Login {
            email: "not-an-email".to_owned(),
            password: "secret".to_owned(),
        };
        assert!(login.validate().is_err());
    }

    #[test]
    fn rejects_empty_password() {
        let login = Login {
            email: "ada@example.com".to_owned(),
            password: String::new(),
        };
        assert!(login.validate().is_err());
    }
}
