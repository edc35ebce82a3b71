//! Location row-scoping for location-bound data such as site registers.
//!
//! Administrators and power users may filter by any location, or none.
//! Every other caller is pinned to their own assigned location and cannot
//! change or clear the filter. This is a convenience for the client; the
//! database's own row constraints remain the enforcement boundary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// A location filter as requested by a client or as enforced for a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationFilter {
    /// Location to restrict rows to; `None` means every location unless
    /// the filter is read-only.
    pub location_id: Option<Uuid>,
    /// Set when the filter is pinned and must not be changed by the client.
    #[serde(default)]
    pub read_only: bool,
}

impl LocationFilter {
    /// An unrestricted filter across every location.
    #[inline]
    pub const fn any() -> Self {
        Self {
            location_id: None,
            read_only: false,
        }
    }

    /// An editable filter on a single location.
    #[inline]
    pub const fn location(location_id: Uuid) -> Self {
        Self {
            location_id: Some(location_id),
            read_only: false,
        }
    }

    /// A read-only filter pinned to `location_id`.
    ///
    /// Pinning to `None` matches no rows.
    #[inline]
    pub const fn pinned(location_id: Option<Uuid>) -> Self {
        Self {
            location_id,
            read_only: true,
        }
    }

    /// Returns whether this filter can match no row at all.
    #[inline]
    pub const fn matches_nothing(&self) -> bool {
        self.read_only && self.location_id.is_none()
    }

    /// Returns whether a row held at `row_location` passes this filter.
    pub fn matches(&self, row_location: Uuid) -> bool {
        match self.location_id {
            Some(location_id) => location_id == row_location,
            None => !self.read_only,
        }
    }
}

/// Computes the filter a caller is actually allowed to apply.
///
/// Unrestricted roles get `requested` back unchanged. Any other role, and
/// the anonymous caller, get a read-only filter pinned to `location_id`
/// whatever was requested.
pub fn scope_location_filter(
    role: Option<Role>,
    location_id: Option<Uuid>,
    requested: LocationFilter,
) -> LocationFilter {
    match role {
        Some(role) if role.is_unrestricted() => requested,
        _ => LocationFilter::pinned(location_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requested_filters() -> Vec<LocationFilter> {
        vec![
            LocationFilter::any(),
            LocationFilter::location(Uuid::new_v4()),
            LocationFilter::pinned(Some(Uuid::new_v4())),
            LocationFilter::pinned(None),
        ]
    }

    #[test]
    fn restricted_roles_are_pinned_to_own_location() {
        let own = Uuid::new_v4();
        for role in [Role::Standard, Role::Manager] {
            for requested in requested_filters() {
                let effective = scope_location_filter(Some(role), Some(own), requested);
                assert_eq!(effective, LocationFilter::pinned(Some(own)));
                assert!(effective.read_only);
            }
        }
    }

    #[test]
    fn unrestricted_roles_keep_requested_filter() {
        let own = Uuid::new_v4();
        for role in [Role::Administrator, Role::PowerUser] {
            for requested in requested_filters() {
                assert_eq!(scope_location_filter(Some(role), Some(own), requested), requested);
            }
        }
    }

    #[test]
    fn restricted_role_without_location_matches_nothing() {
        let effective = scope_location_filter(Some(Role::Standard), None, LocationFilter::any());
        assert!(effective.matches_nothing());
        assert!(!effective.matches(Uuid::new_v4()));
    }

    #[test]
    fn anonymous_is_pinned() {
        let effective = scope_location_filter(None, None, LocationFilter::any());
        assert!(effective.matches_nothing());
    }

    #[test]
    fn filter_matching() {
        let here = Uuid::new_v4();
        let there = Uuid::new_v4();

        assert!(LocationFilter::any().matches(here));
        assert!(LocationFilter::location(here).matches(here));
        assert!(!LocationFilter::location(here).matches(there));
        assert!(LocationFilter::pinned(Some(here)).matches(here));
        assert!(!LocationFilter::pinned(Some(here)).matches(there));
    }

    #[test]
    fn read_only_defaults_to_false_when_deserialized() -> anyhow::Result<()> {
        let filter: LocationFilter = serde_json::from_str(r#"{"locationId":null}"#)?;
        assert_eq!(filter, LocationFilter::any());
        Ok(())
    }
}
