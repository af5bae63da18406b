//! Auth-session state for the current client user.
//!
//! SYSTEM CONTEXT
//! ==============
//! An `AuthSession` is created by whoever owns sign-in and handed to each
//! component that needs identity. Clones share one underlying value, so a
//! sign-in through any handle is seen by every holder of a clone.

use std::sync::Arc;

use tokio::sync::watch;

/// The signed-in user as seen by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
}

/// Shared handle to the current user, `None` while signed out.
#[derive(Clone, Debug)]
pub struct AuthSession {
    user: Arc<watch::Sender<Option<SessionUser>>>,
}

impl AuthSession {
    #[must_use]
    pub fn signed_out() -> Self {
        let (user, _) = watch::channel(None);
        Self { user: Arc::new(user) }
    }

    #[must_use]
    pub fn signed_in(user: SessionUser) -> Self {
        let session = Self::signed_out();
        session.sign_in(user);
        session
    }

    pub fn sign_in(&self, user: SessionUser) {
        self.user.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        self.user.send_replace(None);
    }

    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.user.borrow().clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.borrow().is_some()
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::signed_out()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
