//! Explicit session context.
//!
//! A session is created at login and names the user marker (the normalized
//! login email) that identity resolution looks up. Every navigation starts
//! a new resolution cycle on the session; only the latest cycle may commit
//! an identity.

mod context;
mod store;

pub use context::{CycleFollower, CycleJoin, NavigationTicket, SessionContext};
pub use store::SessionStore;
