//! Credential registry
//!
//! Maps identifiers to hashed secrets and the role they grant. Secrets are
//! hashed with Argon2 at registry construction; the plaintext from
//! configuration is not retained, and verification goes through the hash.

use crate::{AccessError, AccessResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::collections::HashMap;
use tracing::{debug, info};
use tropiqual_core::{CredentialEntry, Role};

/// One configured account: identifier, Argon2 hash of the secret, role.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub identifier: String,
    pub secret_hash: String,
    pub role: Role,
}

impl CredentialRecord {
    /// Create a record, hashing the secret
    pub fn new(identifier: &str, secret: &str, role: Role) -> AccessResult<Self> {
        let secret_hash = hash_secret(secret)?;

        Ok(Self {
            identifier: identifier.to_string(),
            secret_hash,
            role,
        })
    }

    /// Verify a candidate secret against the stored hash
    pub fn verify_secret(&self, secret: &str) -> bool {
        verify_secret(secret, &self.secret_hash).unwrap_or(false)
    }
}

/// Static identifier -> record mapping, built once at process start.
#[derive(Debug, Clone, Default)]
pub struct CredentialRegistry {
    records: HashMap<String, CredentialRecord>,
}

impl CredentialRegistry {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Build the registry from configuration entries
    pub fn from_config(entries: &[CredentialEntry]) -> AccessResult<Self> {
        let mut registry = Self::new();

        for entry in entries {
            let record = CredentialRecord::new(&entry.identifier, &entry.secret, entry.role)?;
            registry.add_record(record)?;
        }

        info!("Credential registry loaded: {} accounts", registry.len());
        Ok(registry)
    }

    /// Add a single record
    pub fn add_record(&mut self, record: CredentialRecord) -> AccessResult<()> {
        if record.identifier.is_empty() {
            return Err(AccessError::credential("Identifier must not be empty"));
        }
        if self.records.contains_key(&record.identifier) {
            return Err(AccessError::credential(format!(
                "Duplicate identifier: {}",
                record.identifier
            )));
        }

        self.records.insert(record.identifier.clone(), record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check a credential pair and return the granted role.
    ///
    /// Identifier lookup is exact and case-sensitive. An unknown identifier
    /// and a wrong secret produce the same `None`; callers must not be able
    /// to tell which part failed.
    pub fn verify(&self, identifier: &str, secret: &str) -> Option<Role> {
        let matched = self
            .records
            .get(identifier)
            .filter(|record| record.verify_secret(secret))
            .map(|record| record.role);

        if matched.is_none() {
            debug!("Credential verification failed");
        }
        matched
    }
}

/// Hash a secret using Argon2
fn hash_secret(secret: &str) -> AccessResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccessError::credential(format!("Failed to hash secret: {}", e)))
}

/// Verify a secret against a hash
fn verify_secret(secret: &str, hash: &str) -> AccessResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AccessError::credential(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CredentialRegistry {
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
        CredentialRegistry::from_config(&entries).unwrap()
    }

    #[test]
    fn verifies_exact_match_only() {
        let registry = registry();

        assert_eq!(
            registry.verify("tropiqual", "tropiqualadmin"),
            Some(Role::Admin)
        );
        assert_eq!(registry.verify("garcom", "staff123"), Some(Role::Staff));

        assert_eq!(registry.verify("tropiqual", "wrong"), None);
        assert_eq!(registry.verify("tropiqual", ""), None);
        assert_eq!(registry.verify("", ""), None);
        assert_eq!(registry.verify("unknown", "tropiqualadmin"), None);
    }

    #[test]
    fn identifier_is_case_sensitive() {
        let registry = registry();

        assert_eq!(registry.verify("Tropiqual", "tropiqualadmin"), None);
        assert_eq!(registry.verify("TROPIQUAL", "tropiqualadmin"), None);
    }

    #[test]
    fn secret_is_case_sensitive() {
        let registry = registry();

        assert_eq!(registry.verify("tropiqual", "TropiqualAdmin"), None);
    }

    #[test]
    fn plaintext_is_not_retained() {
        let registry = registry();
        let record = registry.records.get("tropiqual").unwrap();

        assert_ne!(record.secret_hash, "tropiqualadmin");
        assert!(record.secret_hash.starts_with("$argon2"));
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let mut registry = registry();
        let dup = CredentialRecord::new("garcom", "other", Role::Admin).unwrap();

        assert!(registry.add_record(dup).is_err());
    }
}
