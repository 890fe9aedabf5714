//! Tropiqual Access - access control for the back office
//!
//! This crate owns the authentication and gating decisions for every
//! protected surface of the Tropiqual digital-menu back office:
//!
//! - [`SessionAuthority`]: validates credentials, establishes a role-bearing
//!   session with a fixed lifetime, persists it, and answers access checks
//! - [`RouteGuard`]: wraps a protected surface and decides whether to render
//!   it, a custom denial, or the standard denial view
//! - [`LoginPrompt`]: the credential-collection flow the denial view opens
//!
//! Menu data, recommendations and rendering are other components'
//! business; this crate only decides who may see what.

pub mod auth;
pub mod guard;
pub mod session;

pub use auth::{CredentialRecord, CredentialRegistry};
pub use guard::{
    DenialReason, DenialView, GuardOutcome, LoginPrompt, RoleRequirement, RouteGuard,
};
pub use session::{Session, SessionAuthority, SessionEvent, SessionInfo, SessionStore};

/// Access-level error type
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("Core error: {0}")]
    Core(#[from] tropiqual_core::TropiqualError),

    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Create a credential error
    pub fn credential<S: Into<String>>(message: S) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }
}
