//! Offset pagination query parameters.

use hazreg_postgres::query::Pagination as QueryPagination;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Offset pagination; missing values fall back to offset 0 and limit 50.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct Pagination {
    /// Number of records to skip.
    pub offset: Option<u32>,
    /// Maximum number of records to return (1-1000).
    pub limit: Option<u32>,
}

impl Pagination {
    const DEFAULT_LIMIT: u32 = 50;
    const DEFAULT_OFFSET: u32 = 0;

    #[inline]
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(Self::DEFAULT_OFFSET)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

impl From<Pagination> for QueryPagination {
    fn from(pagination: Pagination) -> Self {
        Self::new(i64::from(pagination.limit()), i64::from(pagination.offset()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        let query: QueryPagination = Pagination::default().into();
        assert_eq!(query, QueryPagination::new(50, 0));

        let query: QueryPagination = Pagination::new(10, 5000).into();
        assert_eq!(query.limit, 1000);
        assert_eq!(query.offset, 10);
    }
}
