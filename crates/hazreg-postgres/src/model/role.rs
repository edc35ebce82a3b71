use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::roles;

/// A named permission tier.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Role {
    pub id: Uuid,
    /// Role name, unique case-insensitively.
    pub name: String,
}
