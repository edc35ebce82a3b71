//! Route permission table.
//!
//! Access is decided per *route prefix*, the first segment of a path:
//! `/sds-library/edit/123` is governed by the `/sds-library` entry. Each
//! listed prefix belongs to a [`RouteTier`] that fixes the set of roles
//! allowed to open it. Authorization is all-or-nothing per route.
//!
//! Prefixes that are not listed fall under the [`UnlistedRoutePolicy`],
//! which defaults to [`UnlistedRoutePolicy::Allow`]: any caller, including
//! an anonymous one, may open them. Deployments that want deny-by-default
//! must opt in explicitly.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "config")]
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{IdentityState, Role};
use crate::utility::tracing_targets::TRACING_TARGET_AUTHORIZATION as TRACING_TARGET;

/// Access tier of a listed route prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RouteTier {
    /// Any authenticated role.
    Authenticated,
    /// Managers, power users and administrators.
    Management,
    /// Administrators only.
    Administration,
}

impl RouteTier {
    /// Returns the roles allowed to open routes of this tier.
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Authenticated => &[
                Role::Standard,
                Role::Manager,
                Role::PowerUser,
                Role::Administrator,
            ],
            Self::Management => &[Role::Manager, Role::PowerUser, Role::Administrator],
            Self::Administration => &[Role::Administrator],
        }
    }

    /// Returns whether `role` may open routes of this tier.
    pub fn allows(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

/// What to do with a route prefix that is not listed in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UnlistedRoutePolicy {
    /// Unlisted prefixes are open to every caller.
    #[default]
    Allow,
    /// Unlisted prefixes are closed to every caller.
    Deny,
}

/// Outcome of a route permission check.
///
/// `is_loading` marks the third state: the identity is still resolving and
/// `has_permission` carries no decision yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteDecision {
    pub has_permission: bool,
    pub is_loading: bool,
}

impl RouteDecision {
    /// The decision reported while the identity is resolving.
    pub const LOADING: Self = Self {
        has_permission: false,
        is_loading: true,
    };

    /// A settled decision.
    #[inline]
    pub const fn settled(has_permission: bool) -> Self {
        Self {
            has_permission,
            is_loading: false,
        }
    }
}

/// Built-in table of the register's screens.
const DEFAULT_ROUTES: &[(&str, RouteTier)] = &[
    ("dashboard", RouteTier::Authenticated),
    ("site-registers", RouteTier::Authenticated),
    ("sds-library", RouteTier::Authenticated),
    ("search", RouteTier::Authenticated),
    ("profile", RouteTier::Authenticated),
    ("compliance", RouteTier::Management),
    ("products", RouteTier::Management),
    ("suppliers", RouteTier::Management),
    ("reports", RouteTier::Management),
    ("exports", RouteTier::Management),
    ("users", RouteTier::Administration),
    ("locations", RouteTier::Administration),
    ("roles", RouteTier::Administration),
    ("ghs-classifications", RouteTier::Administration),
    ("settings", RouteTier::Administration),
];

/// Extracts the route prefix segment of `path`, lower-cased and without
/// the leading slash.
///
/// Surrounding whitespace, the query string and the fragment are ignored,
/// and percent-escapes are decoded before the first segment is taken, so
/// `" /users"` and `"/%75sers"` both govern as `users`. Returns `None` for
/// paths without a first segment, such as `/`.
pub fn route_prefix(path: &str) -> Option<String> {
    let path = path.trim().split(['?', '#']).next().unwrap_or_default();
    let path = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));
    let segment = path
        .trim()
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .trim();

    (!segment.is_empty()).then(|| segment.to_ascii_lowercase())
}

/// Static mapping from route prefix to [`RouteTier`].
///
/// Cheap to clone; clones share the same table.
#[derive(Debug, Clone)]
pub struct RoutePermissionTable {
    routes: Arc<HashMap<String, RouteTier>>,
    unlisted: UnlistedRoutePolicy,
}

impl RoutePermissionTable {
    /// Creates an empty table.
    pub fn empty(unlisted: UnlistedRoutePolicy) -> Self {
        Self {
            routes: Arc::new(HashMap::new()),
            unlisted,
        }
    }

    /// Creates the built-in table with the given unlisted-route policy.
    pub fn new(unlisted: UnlistedRoutePolicy) -> Self {
        DEFAULT_ROUTES
            .iter()
            .fold(Self::empty(unlisted), |table, (prefix, tier)| {
                table.with_route(prefix, *tier)
            })
    }

    /// Adds or replaces the tier of a route prefix.
    ///
    /// Accepts either `"/users"` or `"users"`; only the first segment is used.
    pub fn with_route(mut self, prefix: &str, tier: RouteTier) -> Self {
        if let Some(prefix) = route_prefix(prefix) {
            Arc::make_mut(&mut self.routes).insert(prefix, tier);
        }
        self
    }

    /// Returns the tier governing `path`, or `None` if its prefix is unlisted.
    pub fn tier(&self, path: &str) -> Option<RouteTier> {
        route_prefix(path).and_then(|prefix| self.routes.get(&prefix).copied())
    }

    /// Decides whether `role` may open `path`.
    ///
    /// Listed prefixes require `role` to be in the tier's allowed set, so a
    /// missing role is always denied. Unlisted prefixes follow the
    /// unlisted-route policy regardless of role.
    pub fn check(&self, path: &str, role: Option<Role>) -> bool {
        let has_permission = match self.tier(path) {
            Some(tier) => role.is_some_and(|role| tier.allows(role)),
            None => self.unlisted == UnlistedRoutePolicy::Allow,
        };

        tracing::trace!(
            target: TRACING_TARGET,
            path,
            role = ?role,
            has_permission,
            "Route permission checked"
        );

        has_permission
    }

    /// Evaluates `path` against an identity that may still be loading.
    pub fn evaluate(&self, path: &str, identity: &IdentityState) -> RouteDecision {
        match identity {
            IdentityState::Loading => RouteDecision::LOADING,
            IdentityState::Resolved(identity) => {
                RouteDecision::settled(self.check(path, identity.role))
            }
        }
    }

    /// Iterates the listed prefixes and their tiers, in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, RouteTier)> {
        self.routes
            .iter()
            .map(|(prefix, tier)| (prefix.as_str(), *tier))
    }
}

impl Default for RoutePermissionTable {
    fn default() -> Self {
        Self::new(UnlistedRoutePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::auth::ResolvedIdentity;

    fn roles_and_anonymous() -> impl Iterator<Item = Option<Role>> {
        std::iter::once(None).chain(Role::all().map(Some))
    }

    #[test]
    fn prefix_is_first_segment() {
        assert_eq!(route_prefix("/sds-library/edit/123").as_deref(), Some("sds-library"));
        assert_eq!(route_prefix("/users").as_deref(), Some("users"));
        assert_eq!(route_prefix("/users/").as_deref(), Some("users"));
        assert_eq!(route_prefix("users/42").as_deref(), Some("users"));
    }

    #[test]
    fn prefix_ignores_query_fragment_and_case() {
        assert_eq!(route_prefix("/Users?tab=roles").as_deref(), Some("users"));
        assert_eq!(route_prefix("/reports#latest").as_deref(), Some("reports"));
    }

    #[test]
    fn prefix_ignores_surrounding_whitespace() {
        assert_eq!(route_prefix(" /users").as_deref(), Some("users"));
        assert_eq!(route_prefix("\t/Users/42 ").as_deref(), Some("users"));
        assert_eq!(route_prefix("/ users").as_deref(), Some("users"));
    }

    #[test]
    fn prefix_decodes_percent_escapes() {
        assert_eq!(route_prefix("/%75sers").as_deref(), Some("users"));
        assert_eq!(route_prefix("/%2Fusers").as_deref(), Some("users"));
        assert_eq!(route_prefix("/%20users").as_deref(), Some("users"));
        assert_eq!(route_prefix("/%ff").as_deref(), Some("%ff"));
    }

    #[test]
    fn disguised_listed_prefix_is_still_guarded() {
        let table = RoutePermissionTable::default();
        for path in [" /users", "\n/users/42", "/%75sers", "/%2Fusers", " /%55SERS?tab=roles"] {
            assert!(!table.check(path, None), "anonymous on {path:?}");
            assert!(!table.check(path, Some(Role::Standard)), "standard on {path:?}");
            assert!(table.check(path, Some(Role::Administrator)), "administrator on {path:?}");
        }
    }

    #[test]
    fn root_has_no_prefix() {
        assert_eq!(route_prefix("/"), None);
        assert_eq!(route_prefix(""), None);
        assert_eq!(route_prefix("?next=/users"), None);
    }

    #[test]
    fn listed_prefix_allows_exactly_its_tier() {
        let table = RoutePermissionTable::default();
        for (prefix, tier) in table.routes() {
            let path = format!("/{prefix}/detail");
            for role in Role::all() {
                assert_eq!(
                    table.check(&path, Some(role)),
                    tier.allowed_roles().contains(&role),
                    "{role} on {path}"
                );
            }
            assert!(!table.check(&path, None), "anonymous on {path}");
        }
    }

    #[test]
    fn unlisted_prefix_is_open_by_default() {
        let table = RoutePermissionTable::default();
        for role in roles_and_anonymous() {
            assert!(table.check("/help", role));
            assert!(table.check("/", role));
        }
    }

    #[test]
    fn unlisted_prefix_closed_when_denied() {
        let table = RoutePermissionTable::new(UnlistedRoutePolicy::Deny);
        for role in roles_and_anonymous() {
            assert!(!table.check("/help", role));
        }
        assert!(table.check("/dashboard", Some(Role::Standard)));
    }

    #[test]
    fn administrator_can_open_users() {
        let table = RoutePermissionTable::default();
        assert!(table.check("/users", Some(Role::Administrator)));
    }

    #[test]
    fn standard_cannot_open_users() {
        let table = RoutePermissionTable::default();
        assert!(!table.check("/users", Some(Role::Standard)));
    }

    #[test]
    fn manager_tiers() {
        let table = RoutePermissionTable::default();
        assert!(table.check("/compliance", Some(Role::Manager)));
        assert!(!table.check("/locations", Some(Role::Manager)));
    }

    #[test]
    fn poweruser_tiers() {
        let table = RoutePermissionTable::default();
        assert!(table.check("/dashboard", Some(Role::PowerUser)));
        assert!(table.check("/compliance", Some(Role::PowerUser)));
        assert!(!table.check("/users", Some(Role::PowerUser)));
    }

    #[test]
    fn custom_route_overrides_tier() {
        let table = RoutePermissionTable::default().with_route("/Reports", RouteTier::Administration);
        assert_eq!(table.tier("/reports/monthly"), Some(RouteTier::Administration));
        assert!(!table.check("/reports", Some(Role::Manager)));
    }

    #[test]
    fn evaluate_reports_loading_separately() {
        let table = RoutePermissionTable::default();
        let decision = table.evaluate("/users", &IdentityState::Loading);
        assert_eq!(decision, RouteDecision::LOADING);
        assert!(decision.is_loading);

        let admin = IdentityState::from(ResolvedIdentity::new(Some(Role::Administrator), None));
        assert_eq!(table.evaluate("/users", &admin), RouteDecision::settled(true));

        let anonymous = IdentityState::from(ResolvedIdentity::anonymous());
        assert_eq!(table.evaluate("/users", &anonymous), RouteDecision::settled(false));
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("deny".parse::<UnlistedRoutePolicy>().ok(), Some(UnlistedRoutePolicy::Deny));
        assert_eq!(UnlistedRoutePolicy::Allow.to_string(), "allow");
    }
}
