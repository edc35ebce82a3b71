//! Request extractors.
//!
//! ## Authentication and authorization
//!
//! - [`SessionHeader`] - session token from the `Authorization` header
//! - [`AuthState`] - the caller's session and resolved identity
//!
//! ## Request data
//!
//! - [`Json`] - JSON bodies with structured rejections
//! - [`ValidateJson`] - JSON bodies checked with `validator`
//! - [`Query`] - query strings with structured rejections
//! - [`ValidateQuery`] - query strings checked with `validator`

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthState, SessionHeader};
pub use crate::extract::reject::{Json, Query, ValidateJson, ValidateQuery};
