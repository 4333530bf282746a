//! # Session Module
//!
//! Explicit per-session login context.
//!
//! - Lives exactly as long as one interactive session
//! - Owned by its caller and passed where it is needed; there is no global flag
//! - Credentials are accepted but never validated against any store

use crate::PrivoptError;
use serde::{Deserialize, Serialize};

/// Login state of one interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    username: Option<String>,
    logged_in: bool,
}

impl Session {
    /// Create a logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the session as logged in.
    ///
    /// Any username/password pair is accepted; the password is discarded.
    pub fn login(&mut self, username: impl Into<String>, _password: &str) {
        self.username = Some(username.into());
        self.logged_in = true;
    }

    /// Reset the session to its logged-out state.
    pub fn logout(&mut self) {
        self.username = None;
        self.logged_in = false;
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Gate an operation on the login flag.
    pub fn require_login(&self) -> Result<(), PrivoptError> {
        if self.logged_in {
            Ok(())
        } else {
            Err(PrivoptError::NotLoggedIn)
        }
    }
}
