//! Repository traits implemented on [`PgConnection`].
//!
//! All list queries are bounded by [`Pagination`].
//!
//! [`PgConnection`]: crate::PgConnection

mod location;
mod site_register;
mod user;

pub use location::LocationRepository;
use serde::{Deserialize, Serialize};
pub use site_register::SiteRegisterRepository;
pub use user::UserRepository;

/// Largest page a single query may return.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance with the limit clamped to
    /// `1..=MAX_PAGE_SIZE` and a non-negative offset.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            offset: offset.max(0),
        }
    }

    /// Applies this window to an in-memory sequence.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(0))
            .cloned()
            .collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(50, 0)
    }
}
