//! User records and their role assignments.

use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::users;

/// A user record as stored by the application.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, unique case-insensitively.
    pub email: String,
    /// Human-readable name.
    pub display_name: String,
    /// Argon2 PHC string; `None` for accounts that cannot log in.
    pub password_hash: Option<String>,
    /// Assigned location, used for row scoping.
    pub location_id: Option<Uuid>,
    /// Reporting manager.
    pub manager_id: Option<Uuid>,
    /// Inactive users never resolve to an identity.
    pub is_active: bool,
}

/// A user together with the names of every role assigned to them.
///
/// Role names are returned as stored, ordered by name; interpreting them
/// is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccess {
    pub user: User,
    pub role_names: Vec<String>,
}
