//! Authorization core: roles, identities, route permissions and row scoping.
//!
//! - [`Role`] and its precedence.
//! - [`ResolvedIdentity`] and [`IdentityState`], the result of resolving
//!   a user marker.
//! - [`RoutePermissionTable`], which maps route prefixes to the roles that
//!   may open them, and the [`PermissionCheck`] state machine.
//! - [`scope_location_filter`], the row-scoping rule for location-bound data.
//! - [`SessionHeader`] and [`AuthState`], the request extractors.

mod auth_state;
mod identity;
mod location_scope;
mod permission_check;
mod role;
mod route_access;
mod session_header;

pub use auth_state::AuthState;
pub use identity::{IdentityState, ResolvedIdentity};
pub use location_scope::{LocationFilter, scope_location_filter};
pub use permission_check::PermissionCheck;
pub use role::Role;
pub use route_access::{
    RouteDecision, RoutePermissionTable, RouteTier, UnlistedRoutePolicy, route_prefix,
};
pub use session_header::SessionHeader;
