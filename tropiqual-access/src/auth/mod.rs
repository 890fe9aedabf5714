//! Credential handling
//!
//! The credential set is process configuration: loaded once at startup,
//! hashed, and never edited at runtime. Changing an account means
//! redeploying configuration.

pub mod credentials;

pub use credentials::{CredentialRecord, CredentialRegistry};
