//! Site-register request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::auth::LocationFilter;

/// A location filter as requested by the client.
#[must_use]
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScopeFilter {
    /// Location to filter by; omit for every location.
    pub location_id: Option<Uuid>,
}

impl ScopeFilter {
    /// Returns the filter as requested, before scoping.
    pub fn requested(self) -> LocationFilter {
        match self.location_id {
            Some(location_id) => LocationFilter::location(location_id),
            None => LocationFilter::any(),
        }
    }
}

/// Query parameters of the site-register listing.
#[must_use]
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListSiteRegisters {
    /// Location to filter by; ignored for location-bound roles.
    pub location_id: Option<Uuid>,
    /// Number of records to skip.
    pub offset: Option<u32>,
    /// Maximum number of records to return (1-1000).
    pub limit: Option<u32>,
}

impl ListSiteRegisters {
    pub fn filter(&self) -> ScopeFilter {
        ScopeFilter {
            location_id: self.location_id,
        }
    }

    pub fn pagination(&self) -> super::Pagination {
        super::Pagination {
            offset: self.offset,
            limit: self.limit,
        }
    }
}
