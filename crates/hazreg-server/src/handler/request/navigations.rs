//! Navigation request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A client navigation to `path`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Navigate {
    /// Path being opened, for example `/users/42?tab=roles`.
    #[validate(length(min = 1, max = 2048), custom(function = "validate_route_path"))]
    pub path: String,
}

/// Query parameters of a non-blocking permission lookup.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NavigationStatus {
    /// Path to evaluate.
    #[validate(length(min = 1, max = 2048), custom(function = "validate_route_path"))]
    pub path: String,
}

/// Accepts absolute paths without whitespace or control characters.
fn validate_route_path(path: &str) -> Result<(), ValidationError> {
    if !path.starts_with('/') {
        return Err(ValidationError::new("route_path")
            .with_message("must be an absolute path starting with '/'".into()));
    }

    if path.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::new("route_path")
            .with_message("must not contain whitespace or control characters".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigate(path: &str) -> Navigate {
        Navigate {
            path: path.to_owned(),
        }
    }

    #[test]
    fn absolute_paths_are_accepted() {
        assert!(navigate("/").validate().is_ok());
        assert!(navigate("/users/42?tab=roles").validate().is_ok());
        assert!(navigate("/%75sers").validate().is_ok());
    }

    #[test]
    fn relative_or_padded_paths_are_rejected() {
        for path in ["users", " /users", "/users ", "/ users", "\n/users", ""] {
            assert!(navigate(path).validate().is_err(), "{path:?}");
        }
    }

    #[test]
    fn status_query_uses_the_same_rules() {
        let status = NavigationStatus {
            path: " /users".to_owned(),
        };
        assert!(status.validate().is_err());

        let status = NavigationStatus {
            path: format!("/{}", "x".repeat(2048)),
        };
        assert!(status.validate().is_err());
    }
}
