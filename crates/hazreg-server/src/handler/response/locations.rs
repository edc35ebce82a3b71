//! Location response types.

use hazreg_postgres::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A site or sub-site in the location hierarchy.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
}

impl Location {
    pub fn from_model(location: model::Location) -> Self {
        Self {
            location_id: location.id,
            parent_id: location.parent_id,
            name: location.name,
        }
    }
}

pub type LocationsPage = super::Page<Location>;
