//! Database models for the tables read by the authorization service.

mod location;
mod role;
mod site_register;
mod user;

pub use location::Location;
pub use role::Role;
pub use site_register::SiteRegister;
pub use user::{User, UserAccess};
