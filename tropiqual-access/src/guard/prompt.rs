//! Credential prompt
//!
//! The collection flow the denial view opens. Holds the two input fields
//! and the last error; forwards submission to the session authority.

use crate::session::SessionAuthority;
use std::sync::Arc;
use tracing::debug;

/// Generic failure message. One message for every failure mode, so the
/// prompt reveals nothing about which accounts exist.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Credential-collection prompt state machine.
///
/// Closed by default. Opening always starts from a blank form: identifier,
/// secret and error are cleared on every closed-to-open transition. A
/// successful submit closes the prompt and blanks the fields; a failed one
/// keeps it open with a generic error.
pub struct LoginPrompt {
    authority: Arc<SessionAuthority>,
    open: bool,
    identifier: String,
    secret: String,
    error: Option<String>,
}

impl LoginPrompt {
    pub fn new(authority: Arc<SessionAuthority>) -> Self {
        Self {
            authority,
            open: false,
            identifier: String::new(),
            secret: String::new(),
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the prompt. Transitioning from closed clears the form.
    pub fn open(&mut self) {
        if !self.open {
            self.reset_fields();
        }
        self.open = true;
    }

    /// Close the prompt, keeping nothing
    pub fn close(&mut self) {
        self.open = false;
        self.reset_fields();
    }

    pub fn set_identifier(&mut self, identifier: &str) {
        self.identifier = identifier.to_string();
    }

    pub fn set_secret(&mut self, secret: &str) {
        self.secret = secret.to_string();
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the current fields to the session authority.
    ///
    /// On success the prompt closes and the form is blanked; on failure it
    /// stays open showing the generic error.
    pub fn submit(&mut self) -> bool {
        self.error = None;

        if self.authority.login(&self.identifier, &self.secret) {
            debug!("Prompt submit accepted");
            self.close();
            true
        } else {
            debug!("Prompt submit rejected");
            self.error = Some(INVALID_CREDENTIALS.to_string());
            false
        }
    }

    fn reset_fields(&mut self) {
        self.identifier.clear();
        self.secret.clear();
        self.error = None;
    }
}
