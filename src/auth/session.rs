//! Local session store.
//!
//! Keeps the accounts registered on this machine and the active session in
//! `session.json` next to the config file.

use super::{AuthProvider, AuthState, AuthUser, UserMetadata};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    accounts: Vec<AuthUser>,
    /// Id of the signed-in account
    #[serde(default)]
    active: Option<String>,
    #[serde(default)]
    signed_in_at: Option<DateTime<Utc>>,
}

/// [`AuthProvider`] backed by a JSON file.
#[derive(Debug)]
pub struct LocalSessionAuth {
    path: PathBuf,
    file: SessionFile,
}

impl LocalSessionAuth {
    /// Load the session file, starting empty if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let file = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read session file: {:?}", path))?;
            serde_json::from_str(&content).with_context(|| "Failed to parse session file")?
        } else {
            SessionFile::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// The signed-in account, if any.
    pub fn current_user(&self) -> Option<&AuthUser> {
        let active = self.file.active.as_deref()?;
        self.file.accounts.iter().find(|a| a.id == active)
    }

    /// When the current session started.
    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.current_user().and(self.file.signed_in_at)
    }

    fn activate(&mut self, user: &AuthUser) -> Result<()> {
        self.file.active = Some(user.id.clone());
        self.file.signed_in_at = Some(Utc::now());
        self.save()
    }

    fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.file)
            .with_context(|| "Failed to serialize session")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {:?}", parent))?;
        }

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {:?}", self.path))?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)
                .with_context(|| format!("Failed to get file metadata: {:?}", self.path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", self.path))?;
        }

        Ok(())
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let valid = matches!(
        email.split_once('@'),
        Some((local, domain)) if !local.is_empty() && domain.contains('.')
    );
    if !valid {
        anyhow::bail!("'{}' is not a valid email address", email);
    }
    Ok(email)
}

impl AuthProvider for LocalSessionAuth {
    fn state(&self) -> AuthState {
        match self.current_user() {
            Some(user) => AuthState::signed_in(user.clone()),
            None => AuthState::anonymous(),
        }
    }

    fn sign_in(&mut self, email: &str) -> Result<AuthUser> {
        let email = normalize_email(email)?;
        let user = self
            .file
            .accounts
            .iter()
            .find(|a| a.email == email)
            .cloned()
            .with_context(|| format!("No account registered for {}", email))?;

        self.activate(&user)?;
        info!("Signed in as {}", user.id);
        Ok(user)
    }

    fn sign_up(&mut self, email: &str, display_name: &str) -> Result<AuthUser> {
        let email = normalize_email(email)?;
        if self.file.accounts.iter().any(|a| a.email == email) {
            anyhow::bail!("An account for {} already exists", email);
        }

        let display_name = display_name.trim();
        let user = AuthUser {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            user_metadata: UserMetadata {
                display_name: (!display_name.is_empty()).then(|| display_name.to_string()),
            },
        };

        self.file.accounts.push(user.clone());
        self.activate(&user)?;
        info!("Registered account {}", user.id);
        Ok(user)
    }

    fn sign_out(&mut self) -> Result<()> {
        if self.file.active.take().is_some() {
            self.file.signed_in_at = None;
            self.save()?;
            info!("Signed out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sign_up_then_reload_keeps_session() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let mut auth = LocalSessionAuth::load(&path).unwrap();
        assert!(!auth.state().is_authenticated);

        let user = auth.sign_up("Sam@Example.com", "Sam").unwrap();
        assert_eq!(user.email, "sam@example.com");

        let reloaded = LocalSessionAuth::load(&path).unwrap();
        assert!(reloaded.signed_in_at().is_some());
        let state = reloaded.state();
        assert!(state.is_authenticated);
        assert_eq!(state.user.unwrap().id, user.id);
    }

    #[test]
    fn test_sign_in_requires_known_account() {
        let temp_dir = TempDir::new().unwrap();
        let mut auth = LocalSessionAuth::load(&temp_dir.path().join("session.json")).unwrap();
        assert!(auth.sign_in("nobody@example.com").is_err());

        auth.sign_up("sam@example.com", "").unwrap();
        auth.sign_out().unwrap();
        assert!(!auth.state().is_authenticated);
        assert!(auth.signed_in_at().is_none());

        let user = auth.sign_in(" SAM@example.com ").unwrap();
        assert_eq!(user.user_metadata.display_name, None);
        assert!(auth.state().is_authenticated);
    }

    #[test]
    fn test_duplicate_and_invalid_emails_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut auth = LocalSessionAuth::load(&temp_dir.path().join("session.json")).unwrap();
        auth.sign_up("sam@example.com", "Sam").unwrap();
        assert!(auth.sign_up("sam@example.com", "Other").is_err());
        assert!(auth.sign_up("not-an-email", "X").is_err());
        assert!(auth.sign_up("@example.com", "X").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let mut auth = LocalSessionAuth::load(&path).unwrap();
        auth.sign_up("sam@example.com", "Sam").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
