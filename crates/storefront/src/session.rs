//! Session store: the signed-in user's credentials and profile.
//!
//! The store is an explicit object handed to the [`ApiClient`](crate::api::ApiClient)
//! rather than ambient global storage, so tests and front ends can supply
//! their own implementation.
//!
//! # Invariant
//!
//! Every write replaces the whole [`Session`] value under one lock, so a
//! reader never observes a half-updated session. Outside of
//! [`SessionStore::restore_tokens`] (tokens loaded from disk, profile not yet
//! verified), a user profile is present iff an access token is present.

use std::sync::{PoisonError, RwLock};

use secrecy::SecretString;

use crate::models::UserProfile;

/// Credentials and profile of the current user. All absent when signed out.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access_token: Option<SecretString>,
    pub refresh_token: Option<SecretString>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// Returns `true` if nothing is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

/// Storage for the current [`Session`].
///
/// Implementations must apply each write atomically with respect to reads.
pub trait SessionStore: Send + Sync {
    /// A copy of the current session.
    fn snapshot(&self) -> Session;

    /// Replace tokens and profile in one step (successful login).
    fn login(&self, access_token: SecretString, refresh_token: SecretString, user: UserProfile);

    /// Store persisted tokens whose profile has not been fetched yet.
    fn restore_tokens(&self, access_token: SecretString, refresh_token: SecretString);

    /// Swap in a refreshed access token, leaving refresh token and profile alone.
    ///
    /// Ignored when no refresh token is stored, so a refresh finishing after
    /// logout can not bring a cleared session back.
    fn update_access_token(&self, access_token: SecretString);

    /// Forget everything. Idempotent.
    fn clear(&self);

    /// The current access token, if any.
    fn access_token(&self) -> Option<SecretString> {
        self.snapshot().access_token
    }

    /// The current refresh token, if any.
    fn refresh_token(&self) -> Option<SecretString> {
        self.snapshot().refresh_token
    }

    /// The signed-in user's profile, if any.
    fn current_user(&self) -> Option<UserProfile> {
        self.snapshot().user
    }

    /// Returns `true` if a user profile is present.
    fn is_authenticated(&self) -> bool {
        self.snapshot().user.is_some()
    }

    /// Returns `true` if the signed-in user is an administrator.
    fn is_admin(&self) -> bool {
        self.snapshot().user.is_some_and(|user| user.is_admin)
    }
}

/// In-memory [`SessionStore`]. Starts empty.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn replace(&self, session: Session) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

impl SessionStore for MemorySessionStore {
    fn snapshot(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn login(&self, access_token: SecretString, refresh_token: SecretString, user: UserProfile) {
        self.replace(Session {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            user: Some(user),
        });
    }

    fn restore_tokens(&self, access_token: SecretString, refresh_token: SecretString) {
        self.replace(Session {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            user: None,
        });
    }

    fn update_access_token(&self, access_token: SecretString) {
        let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
        if session.refresh_token.is_some() {
            session.access_token = Some(access_token);
        }
    }

    fn clear(&self) {
        self.replace(Session::default());
    }
}
