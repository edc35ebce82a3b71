//! Application roles and multi-role precedence.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// A named permission tier attached to a user.
///
/// Variants are declared in ascending privilege order, so the derived
/// [`Ord`] matches [`Role::privilege_level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, JsonSchema)]
#[derive(AsRefStr, Display, EnumIter, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    /// Day-to-day user restricted to their own location.
    Standard,
    /// Supervises compliance work; restricted to their own location.
    Manager,
    /// Sees every location without administering the system.
    PowerUser,
    /// Full access, including user and location administration.
    Administrator,
}

impl Role {
    /// Returns the privilege level; higher outranks lower.
    #[must_use]
    pub const fn privilege_level(self) -> u8 {
        match self {
            Self::Standard => 0,
            Self::Manager => 1,
            Self::PowerUser => 2,
            Self::Administrator => 3,
        }
    }

    /// Returns whether the role is exempt from location row-scoping.
    #[must_use]
    pub const fn is_unrestricted(self) -> bool {
        matches!(self, Self::PowerUser | Self::Administrator)
    }

    /// Parses a stored role name, ignoring case and surrounding whitespace.
    pub fn parse_name(name: &str) -> Option<Self> {
        Self::from_str(name.trim()).ok()
    }

    /// Resolves the effective role of a user from all of their assignments.
    ///
    /// The most privileged recognized role wins, independent of the order
    /// the assignments were returned in. Unrecognized names are skipped;
    /// `None` means the user holds no recognized role.
    pub fn from_assignments<I>(names: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| Self::parse_name(name.as_ref()))
            .max_by_key(|role| role.privilege_level())
    }

    /// Iterates every role in ascending privilege order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Role::parse_name("Administrator"), Some(Role::Administrator));
        assert_eq!(Role::parse_name("  MANAGER "), Some(Role::Manager));
        assert_eq!(Role::parse_name("PowerUser"), Some(Role::PowerUser));
        assert_eq!(Role::parse_name("poweruser"), Some(Role::PowerUser));
        assert_eq!(Role::parse_name("owner"), None);
        assert_eq!(Role::parse_name(""), None);
    }

    #[test]
    fn serializes_lowercase() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&Role::PowerUser)?, "\"poweruser\"");
        assert_eq!(Role::Administrator.to_string(), "administrator");
        assert_eq!(Role::Standard.as_ref(), "standard");
        Ok(())
    }

    #[test]
    fn highest_privilege_wins() {
        assert_eq!(
            Role::from_assignments(["standard", "administrator", "manager"]),
            Some(Role::Administrator)
        );
        assert_eq!(
            Role::from_assignments(["Manager", "standard"]),
            Some(Role::Manager)
        );
    }

    #[test]
    fn assignment_order_does_not_matter() {
        let forward = Role::from_assignments(["standard", "poweruser"]);
        let reverse = Role::from_assignments(["poweruser", "standard"]);
        assert_eq!(forward, reverse);
        assert_eq!(forward, Some(Role::PowerUser));
    }

    #[test]
    fn unknown_assignments_are_ignored() {
        assert_eq!(
            Role::from_assignments(["auditor", "standard"]),
            Some(Role::Standard)
        );
        assert_eq!(Role::from_assignments(["auditor"]), None);
        assert_eq!(Role::from_assignments(Vec::<String>::new()), None);
    }

    #[test]
    fn ordering_matches_privilege_level() {
        let roles: Vec<_> = Role::all().collect();
        for pair in roles.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].privilege_level() < pair[1].privilege_level());
        }
    }

    #[test]
    fn unrestricted_roles() {
        assert!(Role::Administrator.is_unrestricted());
        assert!(Role::PowerUser.is_unrestricted());
        assert!(!Role::Manager.is_unrestricted());
        assert!(!Role::Standard.is_unrestricted());
    }
}
