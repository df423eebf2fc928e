//! Authentication collaborator.
//!
//! The router only consumes [`AuthState`]; who produces it is behind the
//! [`AuthProvider`] trait. [`LocalSessionAuth`] is the provider shipped with
//! the terminal client.

pub mod session;

pub use session::LocalSessionAuth;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Profile fields the identity provider keeps alongside the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl AuthUser {
    /// Name shown in the UI and sent to `/auth/sync-user`.
    pub fn display_name(&self) -> String {
        self.user_metadata
            .display_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| {
                self.email
                    .split('@')
                    .next()
                    .unwrap_or(&self.email)
                    .to_string()
            })
    }
}

/// Snapshot of the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub is_loading: bool,
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
            is_authenticated: false,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: AuthUser) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
            is_authenticated: true,
        }
    }
}

/// Source of [`AuthState`] plus the account operations the screens need.
pub trait AuthProvider {
    /// Current snapshot.
    fn state(&self) -> AuthState;

    /// Sign in with an existing account.
    fn sign_in(&mut self, email: &str) -> Result<AuthUser>;

    /// Register a new account and sign in with it.
    fn sign_up(&mut self, email: &str, display_name: &str) -> Result<AuthUser>;

    /// End the current session.
    fn sign_out(&mut self) -> Result<()>;
}
