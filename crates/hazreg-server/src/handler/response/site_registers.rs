//! Site-register response types.

use hazreg_postgres::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::auth::LocationFilter;

/// One hazardous product held at a location.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteRegister {
    pub site_register_id: Uuid,
    pub location_id: Uuid,
    pub product_name: String,
    pub storage_area: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}

impl SiteRegister {
    pub fn from_model(row: model::SiteRegister) -> Self {
        Self {
            site_register_id: row.id,
            location_id: row.location_id,
            product_name: row.product_name,
            storage_area: row.storage_area,
            quantity: row.quantity,
            unit: row.unit,
        }
    }
}

/// Site-register rows together with the filter that was applied.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteRegistersPage {
    /// Effective filter; read-only when pinned to the caller's location.
    pub filter: LocationFilter,
    #[serde(flatten)]
    pub page: super::Page<SiteRegister>,
}
