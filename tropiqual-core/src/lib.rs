//! Tropiqual Core - Core data structures and shared infrastructure
//!
//! This module defines the foundation shared by the Tropiqual back-office
//! crates: the role model, application configuration, error types and
//! logging setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
