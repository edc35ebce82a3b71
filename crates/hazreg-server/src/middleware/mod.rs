//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Route permissions, checked against the route table
//! - Security (CORS, headers, body limits)
//! - Observability (request ids, tracing, timing)
//! - Recovery (panics, timeouts, service errors)
//! - OpenAPI documentation
//!
//! ```rust,no_run
//! use axum::Router;
//! use hazreg_server::middleware::{
//!     RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery();
//! ```

mod authorization;
mod constants;
mod observability;
mod recovery;
mod security;
mod specification;

pub use authorization::{RouterAuthorizationExt, require_route_permission};
pub use constants::{DEFAULT_MAX_BODY_SIZE, REQUEST_ID_HEADER};
pub use observability::{RouterObservabilityExt, track_request_metrics};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{
    CorsConfig, FrameOptions, ReferrerPolicy, RouterSecurityExt, SecurityHeadersConfig,
};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
