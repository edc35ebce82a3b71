//! Request types for HTTP handlers.

mod authentications;
mod navigations;
mod paginations;
mod site_registers;

pub use authentications::*;
pub use navigations::*;
pub use paginations::*;
pub use site_registers::*;
