//! Route guard
//!
//! Wraps a protected surface and decides, against the session authority,
//! whether to produce the surface, a caller-supplied denial, or the
//! standard denial view. The guard is not a one-shot gate: every call
//! re-evaluates, and `changes()` exposes the authority's event stream so a
//! rendering loop can re-check the moment a login or logout happens.

pub mod prompt;

pub use prompt::LoginPrompt;

use crate::session::{SessionAuthority, SessionEvent};
use std::sync::Arc;
use tokio::sync::broadcast;
use tropiqual_core::Role;

/// The role a protected surface demands.
///
/// Guests are never a requirement; public surfaces simply have no guard.
/// Keeping this a two-variant type makes a guest-gated surface
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    Staff,
    Admin,
}

impl RoleRequirement {
    /// The role this requirement translates to for access checks
    pub fn role(self) -> Role {
        match self {
            RoleRequirement::Staff => Role::Staff,
            RoleRequirement::Admin => Role::Admin,
        }
    }
}

impl std::fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleRequirement::Staff => write!(f, "staff"),
            RoleRequirement::Admin => write!(f, "admin"),
        }
    }
}

/// Why access was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// No valid session exists
    NotAuthenticated,
    /// A valid session exists but its role is below the requirement
    InsufficientRole,
}

/// The standard denial view: a restricted-area message, a call to open the
/// credential prompt, and a way back to the public menu.
#[derive(Debug, Clone, PartialEq)]
pub struct DenialView {
    pub required: RoleRequirement,
    pub reason: DenialReason,
}

impl DenialView {
    /// Restricted-area message. Generic on purpose: it never says whether
    /// an account exists or which part of a credential was wrong.
    pub fn message(&self) -> String {
        let audience = match self.required {
            RoleRequirement::Staff => "staff",
            RoleRequirement::Admin => "administrators",
        };
        format!(
            "This area is restricted to {}. Sign in to continue.",
            audience
        )
    }

    /// The denial view always offers the credential prompt as recovery
    pub fn offers_login(&self) -> bool {
        true
    }

    /// Link back to the public menu
    pub fn home_path(&self) -> &'static str {
        "/"
    }
}

/// Result of guarding a piece of renderable content
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome<T> {
    /// Access granted; the content passes through unmodified
    Granted(T),
    /// Access denied; render the standard denial view
    Denied(DenialView),
}

impl<T> GuardOutcome<T> {
    pub fn is_granted(&self) -> bool {
        matches!(self, GuardOutcome::Granted(_))
    }

    /// The granted content, if access was granted
    pub fn granted(self) -> Option<T> {
        match self {
            GuardOutcome::Granted(content) => Some(content),
            GuardOutcome::Denied(_) => None,
        }
    }
}

/// Gate for one protected surface.
///
/// Holds a shared handle to the session authority and the surface's single
/// required role. Stateless beyond that; the verdict is recomputed on every
/// call.
pub struct RouteGuard {
    authority: Arc<SessionAuthority>,
    required: RoleRequirement,
}

impl RouteGuard {
    pub fn new(authority: Arc<SessionAuthority>, required: RoleRequirement) -> Self {
        Self {
            authority,
            required,
        }
    }

    pub fn required(&self) -> RoleRequirement {
        self.required
    }

    /// Gate `content` on the current session.
    ///
    /// Pass-through on success: the content comes back untouched, no side
    /// effects. On denial the standard denial view is produced, carrying
    /// whether the viewer is unauthenticated or merely under-privileged.
    pub fn guard<T>(&self, content: T) -> GuardOutcome<T> {
        if self.authority.check_access(self.required.role()) {
            return GuardOutcome::Granted(content);
        }

        let reason = if self.authority.current_session().is_some() {
            DenialReason::InsufficientRole
        } else {
            DenialReason::NotAuthenticated
        };

        GuardOutcome::Denied(DenialView {
            required: self.required,
            reason,
        })
    }

    /// Gate `content`, rendering the caller's own `denied` content instead
    /// of the standard denial view
    pub fn guard_or<T>(&self, content: T, denied: T) -> T {
        match self.guard(content) {
            GuardOutcome::Granted(content) => content,
            GuardOutcome::Denied(_) => denied,
        }
    }

    /// The authority's session event stream, for reactive re-evaluation
    pub fn changes(&self) -> broadcast::Receiver<SessionEvent> {
        self.authority.subscribe()
    }

    /// A credential prompt bound to the same authority, as offered by the
    /// denial view
    pub fn login_prompt(&self) -> LoginPrompt {
        LoginPrompt::new(Arc::clone(&self.authority))
    }
}
