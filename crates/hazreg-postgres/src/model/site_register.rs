use diesel::prelude::*;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::site_registers;

/// A hazardous product held at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = site_registers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SiteRegister {
    /// Unique register entry identifier.
    pub id: Uuid,
    /// Location holding the product.
    pub location_id: Uuid,
    /// Product trade name.
    pub product_name: String,
    /// Storage area within the location.
    pub storage_area: Option<String>,
    /// Quantity held, in `unit`.
    pub quantity: Option<f64>,
    /// Unit of `quantity`.
    pub unit: Option<String>,
}
