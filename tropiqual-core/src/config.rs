//! Configuration management

use crate::error::TropiqualResult;
use crate::types::{CredentialEntry, Role, StorageConfig, TropiqualConfig};

use std::collections::HashSet;
use std::path::Path;

impl Default for TropiqualConfig {
    fn default() -> Self {
        Self {
            // The house account set. Secrets here are configuration data;
            // the access layer hashes them at startup and discards the
            // plaintext. Replace before deploying.
            credentials: vec![
                CredentialEntry {
                    identifier: "tropiqual".to_string(),
                    secret: "tropiqualadmin".to_string(),
                    role: Role::Admin,
                },
                CredentialEntry {
                    identifier: "admin".to_string(),
                    secret: "admin123".to_string(),
                    role: Role::Admin,
                },
                CredentialEntry {
                    identifier: "chef".to_string(),
                    secret: "chef123".to_string(),
                    role: Role::Admin,
                },
                CredentialEntry {
                    identifier: "garcom".to_string(),
                    secret: "staff123".to_string(),
                    role: Role::Staff,
                },
                CredentialEntry {
                    identifier: "funcionario".to_string(),
                    secret: "func123".to_string(),
                    role: Role::Staff,
                },
            ],
            storage: StorageConfig {
                data_dir: "~/.tropiqual/data".to_string(),
            },
        }
    }
}

impl TropiqualConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TropiqualResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::config_error!(format!("Failed to read config file: {}", e), "config", e)
        })?;

        let config: TropiqualConfig = toml::from_str(&content).map_err(|e| {
            crate::config_error!(format!("Failed to parse config: {}", e), "config", e)
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> TropiqualResult<()> {
        let mut seen = HashSet::new();

        for entry in &self.credentials {
            if entry.identifier.is_empty() {
                return Err(crate::validation_error!(
                    "Credential identifier must not be empty",
                    "credentials.identifier",
                    "config"
                ));
            }
            if entry.secret.is_empty() {
                return Err(crate::validation_error!(
                    format!("Credential '{}' has an empty secret", entry.identifier),
                    "credentials.secret",
                    "config"
                ));
            }
            if !seen.insert(entry.identifier.as_str()) {
                return Err(crate::validation_error!(
                    format!("Duplicate credential identifier: {}", entry.identifier),
                    "credentials.identifier",
                    "config"
                ));
            }
        }

        if self.storage.data_dir.is_empty() {
            return Err(crate::validation_error!(
                "storage.data_dir must not be empty",
                "storage.data_dir",
                "config"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TropiqualError;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = TropiqualConfig::default();
        assert!(config.validate().is_ok());
        assert!(config
            .credentials
            .iter()
            .any(|c| c.identifier == "tropiqual" && c.role == Role::Admin));
    }

    #[test]
    fn loads_config_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[credentials]]
identifier = "tropiqual"
secret = "tropiqualadmin"
role = "admin"

[[credentials]]
identifier = "garcom"
secret = "staff123"
role = "staff"

[storage]
data_dir = "/tmp/tropiqual-test"
"#
        )
        .unwrap();

        let config = TropiqualConfig::from_file(file.path()).unwrap();
        assert_eq!(config.credentials.len(), 2);
        assert_eq!(config.credentials[1].role, Role::Staff);
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let mut config = TropiqualConfig::default();
        config.credentials.push(CredentialEntry {
            identifier: "tropiqual".to_string(),
            secret: "other".to_string(),
            role: Role::Staff,
        });

        assert!(matches!(
            config.validate(),
            Err(TropiqualError::Validation { .. })
        ));
    }

    #[test]
    fn rejects_empty_secret() {
        let mut config = TropiqualConfig::default();
        config.credentials[0].secret.clear();

        assert!(config.validate().is_err());
    }
}
