use diesel::prelude::*;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::locations;

/// A node of the location hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Location {
    /// Unique location identifier.
    pub id: Uuid,
    /// Parent node, `None` for roots.
    pub parent_id: Option<Uuid>,
    /// Display name.
    pub name: String,
}
