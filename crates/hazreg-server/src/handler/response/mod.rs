//! Response types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod authentications;
mod errors;
mod identities;
mod locations;
mod monitors;
mod navigations;
mod site_registers;

pub use authentications::*;
pub use errors::*;
pub use identities::*;
pub use locations::*;
pub use monitors::*;
pub use navigations::*;
pub use site_registers::*;

/// Offset-paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "{T}sPage")]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Offset this page starts at.
    pub offset: i64,
    /// Page size that was applied.
    pub limit: i64,
}

impl<T> Page<T> {
    /// Creates a page from already-fetched items.
    pub fn new(items: Vec<T>, pagination: hazreg_postgres::query::Pagination) -> Self {
        Self {
            items,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }

    /// Maps every item with `f`.
    pub fn from_models<M>(
        models: Vec<M>,
        pagination: hazreg_postgres::query::Pagination,
        f: impl FnMut(M) -> T,
    ) -> Self {
        Self::new(models.into_iter().map(f).collect(), pagination)
    }
}
