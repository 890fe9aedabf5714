//! Core data type definitions

use serde::{Deserialize, Serialize};

/// Privilege level of an actor, ordered by capability.
///
/// The declaration order is the privilege order (`Guest < Staff < Admin`),
/// so access checks can compare roles directly. Roles do not inherit from
/// each other; the total order exists only for access checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Staff,
    Admin,
}

impl Role {
    /// Whether this role satisfies a requirement of `required`.
    pub fn satisfies(&self, required: Role) -> bool {
        *self >= required
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Guest => write!(f, "guest"),
            Role::Staff => write!(f, "staff"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" => Ok(Role::Guest),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TropiqualConfig {
    /// Static credential records, loaded once at process start
    pub credentials: Vec<CredentialEntry>,
    /// Storage settings
    pub storage: StorageConfig,
}

/// One configured credential: identifier, secret and the role it grants.
///
/// Secrets live only in the configuration source; the access layer hashes
/// them at registry construction and never keeps the plaintext around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub identifier: String,
    pub secret: String,
    pub role: Role,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the durable session slot
    pub data_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_order_matches_privilege() {
        assert!(Role::Guest < Role::Staff);
        assert!(Role::Staff < Role::Admin);
        assert!(Role::Admin.satisfies(Role::Staff));
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(Role::Staff.satisfies(Role::Staff));
        assert!(!Role::Staff.satisfies(Role::Admin));
        assert!(!Role::Guest.satisfies(Role::Staff));
    }

    #[test]
    fn role_parses_and_displays() {
        for role in [Role::Guest, Role::Staff, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("manager".parse::<Role>().is_err());
    }
}
