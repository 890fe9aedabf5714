//! Session authority
//!
//! Single source of truth for "who is authenticated and with what role".
//! Constructed once at process start and shared by reference; every guard
//! and prompt holds a clone of the same `Arc`.

use super::{Session, SessionInfo, SessionStore};
use crate::auth::CredentialRegistry;
use std::sync::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use tropiqual_core::Role;

/// Session state change, broadcast to interested surfaces.
///
/// Guards use this to re-evaluate without polling; display consumers use it
/// to refresh "logged in as" chrome.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A login succeeded and a session was established
    Established { role: Role },
    /// The session was destroyed by an explicit logout
    LoggedOut,
    /// The session outlived its TTL and was observed expired on read
    Expired,
}

/// Mutable authority state behind the lock
#[derive(Debug, Default)]
struct AuthState {
    /// Whether the durable slot has been consulted this process lifetime
    hydrated: bool,
    session: Option<Session>,
}

/// Owns login/logout/expiry/access-check logic and the durable session slot.
///
/// All operations are synchronous and non-blocking; expiry is evaluated
/// lazily on read, never pushed. Login and logout are the only writers,
/// reads revalidate the TTL every time.
pub struct SessionAuthority {
    credentials: CredentialRegistry,
    store: SessionStore,
    state: RwLock<AuthState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionAuthority {
    /// Create a new authority over a credential registry and session store
    pub fn new(credentials: CredentialRegistry, store: SessionStore) -> Self {
        if credentials.is_empty() {
            warn!("Credential registry is empty; every login will fail");
        }

        let (events, _) = broadcast::channel::<SessionEvent>(16);

        Self {
            credentials,
            store,
            state: RwLock::new(AuthState::default()),
            events,
        }
    }

    /// Validate a credential pair and establish a session on success.
    ///
    /// Returns `false` for any non-matching input with no state change, and
    /// without distinguishing an unknown identifier from a wrong secret.
    /// Never fails: a durable-slot write error is logged and the in-memory
    /// session stands for the rest of the process lifetime.
    pub fn login(&self, identifier: &str, secret: &str) -> bool {
        let Some(role) = self.credentials.verify(identifier, secret) else {
            debug!("Login rejected");
            return false;
        };

        let session = Session::new(role);
        if let Err(e) = self.store.save(&session) {
            warn!("Failed to persist session, continuing in-memory: {}", e);
        }

        {
            let mut state = self.state.write().unwrap();
            state.hydrated = true;
            state.session = Some(session);
        }

        info!("Session established with role: {}", role);
        let _ = self.events.send(SessionEvent::Established { role });
        true
    }

    /// Destroy the current session, in memory and in the durable slot.
    ///
    /// Idempotent: with no active session this changes nothing and emits
    /// nothing.
    pub fn logout(&self) {
        let had_session = self.read_valid_session().is_some();

        {
            let mut state = self.state.write().unwrap();
            state.hydrated = true;
            state.session = None;
        }
        self.store.clear();

        if had_session {
            info!("Session destroyed by logout");
            let _ = self.events.send(SessionEvent::LoggedOut);
        }
    }

    /// The current valid session, if any.
    ///
    /// The first read of a process lifetime hydrates from the durable slot.
    /// An expired record is purged and reported as absent.
    pub fn current_session(&self) -> Option<Session> {
        self.read_valid_session()
    }

    /// Display view of the current session
    pub fn session_info(&self) -> Option<SessionInfo> {
        self.read_valid_session().map(|s| SessionInfo::from(&s))
    }

    /// Whether a valid session exists whose role satisfies `required`.
    ///
    /// An absent or expired session satisfies nothing.
    pub fn check_access(&self, required: Role) -> bool {
        self.read_valid_session()
            .map(|session| session.satisfies(required))
            .unwrap_or(false)
    }

    /// Subscribe to session state changes
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Hydrate if needed, then return the session iff it is still valid.
    ///
    /// Expiry is discovered here: the slot and the in-memory copy are both
    /// purged the moment an expired session is read.
    fn read_valid_session(&self) -> Option<Session> {
        let mut state = self.state.write().unwrap();

        if !state.hydrated {
            state.hydrated = true;
            match self.store.load() {
                Some(session) if session.is_expired() => {
                    debug!("Persisted session expired, purging slot");
                    self.store.clear();
                }
                Some(session) => {
                    debug!("Hydrated session with role: {}", session.role);
                    state.session = Some(session);
                }
                None => {}
            }
        }

        match &state.session {
            Some(session) if session.is_expired() => {
                state.session = None;
                self.store.clear();

                info!("Session expired");
                let _ = self.events.send(SessionEvent::Expired);
                None
            }
            Some(session) => Some(session.clone()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tropiqual_core::CredentialEntry;

    fn authority() -> SessionAuthority {
        let entries = vec![
            CredentialEntry {
                identifier: "tropiqual".to_string(),
                secret: "tropiqualadmin".to_string(),
                role: Role::Admin,
            },
            CredentialEntry {
                identifier: "garcom".to_string(),
                secret: "staff123".to_string(),
                role: Role::Staff,
            },
        ];
        SessionAuthority::new(
            CredentialRegistry::from_config(&entries).unwrap(),
            SessionStore::memory(),
        )
    }

    #[test]
    fn login_establishes_session_with_matched_role() {
        let authority = authority();

        assert!(authority.login("garcom", "staff123"));
        let session = authority.current_session().unwrap();
        assert_eq!(session.role, Role::Staff);
    }

    #[test]
    fn failed_login_leaves_state_unchanged() {
        let authority = authority();

        assert!(!authority.login("tropiqual", "wrong"));
        assert!(authority.current_session().is_none());
        assert!(!authority.check_access(Role::Admin));

        // an established session survives a later failed login
        assert!(authority.login("tropiqual", "tropiqualadmin"));
        assert!(!authority.login("tropiqual", "wrong"));
        assert!(authority.check_access(Role::Admin));
    }

    #[test]
    fn login_effects_are_visible_immediately() {
        let authority = authority();

        assert!(!authority.check_access(Role::Staff));
        assert!(authority.login("garcom", "staff123"));
        assert!(authority.check_access(Role::Staff));
    }

    #[test]
    fn expired_in_memory_session_is_purged_on_read() {
        let authority = authority();
        assert!(authority.login("garcom", "staff123"));

        // back-date the established session past its TTL
        {
            let mut state = authority.state.write().unwrap();
            let session = state.session.as_mut().unwrap();
            session.established_at = Utc::now() - Duration::hours(9);
        }

        assert!(!authority.check_access(Role::Staff));
        assert!(authority.current_session().is_none());
    }

    #[test]
    fn expiry_emits_event() {
        let authority = authority();
        let mut events = authority.subscribe();

        assert!(authority.login("garcom", "staff123"));
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::Established { role: Role::Staff }
        );

        {
            let mut state = authority.state.write().unwrap();
            state.session.as_mut().unwrap().established_at = Utc::now() - Duration::hours(9);
        }
        let _ = authority.current_session();

        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
    }

    #[test]
    fn logout_without_session_emits_nothing() {
        let authority = authority();
        let mut events = authority.subscribe();

        authority.logout();
        assert!(events.try_recv().is_err());
    }
}
