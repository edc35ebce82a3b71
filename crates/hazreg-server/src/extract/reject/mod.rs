//! Request extractors with consistent error responses.
//!
//! Drop-in replacements for the axum extractors of the same name. Their
//! rejections render as the crate's JSON error body instead of plain text.

pub mod enhanced_json;
pub mod enhanced_query;
pub mod validated_json;
pub mod validated_query;

pub use self::enhanced_json::Json;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;
pub use self::validated_query::ValidateQuery;
