//! Session types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tropiqual_core::Role;

/// Fixed session lifetime: 8 hours. Not configurable per session; a longer
/// standing requires a fresh login.
pub const SESSION_TTL_MINUTES: i64 = 480;

/// The authenticated standing of the current actor.
///
/// This struct is also the wire shape of the durable session slot; it
/// serializes to the `{role, established_at}` record the store persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    pub established_at: DateTime<Utc>,
}

impl Session {
    /// Establish a new session with the given role, starting now
    pub fn new(role: Role) -> Self {
        Self {
            role,
            established_at: Utc::now(),
        }
    }

    /// Whether the session has outlived its TTL, evaluated against `now`.
    ///
    /// Validity is strict: `age < ttl` is valid, `age >= ttl` is expired.
    /// A record stamped in the future is corrupt state and counts as
    /// expired as well.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let age = now - self.established_at;
        age < Duration::zero() || age >= Duration::minutes(SESSION_TTL_MINUTES)
    }

    /// Whether the session has outlived its TTL as of now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Session age in minutes
    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.established_at).num_minutes()
    }

    /// Minutes until expiry (0 if already expired)
    pub fn remaining_minutes(&self) -> i64 {
        (SESSION_TTL_MINUTES - self.age_minutes()).max(0)
    }

    /// Whether this session's role satisfies a requirement of `required`
    pub fn satisfies(&self, required: Role) -> bool {
        self.role.satisfies(required)
    }
}

/// Session information for display consumers ("logged in as: admin")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub role: Role,
    pub role_label: String,
    pub established_at: DateTime<Utc>,
    pub age_minutes: i64,
    pub remaining_minutes: i64,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            role: session.role,
            role_label: session.role.to_string(),
            established_at: session.established_at,
            age_minutes: session.age_minutes(),
            remaining_minutes: session.remaining_minutes(),
        }
    }
}
