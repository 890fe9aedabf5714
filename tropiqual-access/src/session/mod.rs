//! Session management
//!
//! A session is the authenticated standing of the current actor: one role,
//! one establishment time, a fixed lifetime. There is exactly one session
//! slot per process; it is either absent or fully established.

pub mod authority;
pub mod store;
pub mod types;

pub use authority::{SessionAuthority, SessionEvent};
pub use store::{SessionStore, SESSION_SLOT};
pub use types::{Session, SessionInfo, SESSION_TTL_MINUTES};
