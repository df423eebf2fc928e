//! Shared test utilities for navigation integration tests.
//!
//! Provides `TestEnv` - an isolated session directory plus a scripted
//! [`FakeApi`], with automatic cleanup via `TempDir`.

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

use courtside::api::{ApiError, LeagueApi, MeResponse, SyncUserRequest};
use courtside::auth::{AuthProvider, LocalSessionAuth};
use courtside::router::UserRole;
use courtside::{App, Config};

/// How long `settle` waits for another effect result.
pub const SETTLE: Duration = Duration::from_millis(200);

/// Backend double with call counters.
///
/// `complete_onboarding` flips the stored status so a later `me` sees it.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeApi {
    pub onboarded: AtomicBool,
    pub role: Mutex<Option<UserRole>>,
    /// Returned by the next `sync_user` call only.
    pub sync_failure: Mutex<Option<ApiError>>,
    /// Returned by every `me` call while set.
    pub me_failure: Mutex<Option<ApiError>>,
    pub sync_calls: AtomicUsize,
    pub me_calls: AtomicUsize,
    pub complete_calls: AtomicUsize,
    pub synced: Mutex<Vec<SyncUserRequest>>,
}

#[allow(dead_code)]
impl FakeApi {
    pub fn onboarded() -> Self {
        let api = Self::default();
        api.onboarded.store(true, Ordering::SeqCst);
        api
    }

    pub fn fail_next_sync(&self, error: ApiError) {
        *self.sync_failure.lock().unwrap() = Some(error);
    }

    pub fn fail_me(&self, error: ApiError) {
        *self.me_failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.sync_calls.load(Ordering::SeqCst),
            self.me_calls.load(Ordering::SeqCst),
            self.complete_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl LeagueApi for FakeApi {
    async fn sync_user(&self, request: &SyncUserRequest) -> Result<(), ApiError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        self.synced.lock().unwrap().push(request.clone());
        match self.sync_failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn me(&self, _user_id: &str) -> Result<MeResponse, ApiError> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.me_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(MeResponse {
            onboarding_completed: self.onboarded.load(Ordering::SeqCst),
            role: *self.role.lock().unwrap(),
        })
    }

    async fn complete_onboarding(&self, _user_id: &str) -> Result<(), ApiError> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        self.onboarded.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// An isolated session store.
#[allow(dead_code)]
pub struct TestEnv {
    temp_dir: TempDir,
    pub session_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let session_path = temp_dir.path().join("session.json");
        Ok(Self {
            temp_dir,
            session_path,
        })
    }

    /// Register an account and leave it signed in.
    pub fn with_signed_in_user(self, email: &str, display_name: &str) -> Result<Self> {
        let mut auth = LocalSessionAuth::load(&self.session_path)?;
        auth.sign_up(email, display_name)?;
        Ok(self)
    }

    /// Whether the session file still has a signed-in account.
    pub fn is_signed_in(&self) -> Result<bool> {
        Ok(LocalSessionAuth::load(&self.session_path)?
            .state()
            .is_authenticated)
    }

    /// Config that never fires the resolve timeout during a test.
    pub fn config() -> Config {
        Config {
            resolve_timeout_secs: 600,
            ..Config::default()
        }
    }

    /// Build an app at `location` and feed it the stored session.
    pub fn app(&self, api: Arc<FakeApi>, location: &str) -> Result<App> {
        let auth = LocalSessionAuth::load(&self.session_path)?;
        let mut app = App::new(Self::config(), Box::new(auth), api, location)?;
        app.start();
        Ok(app)
    }
}

// ==================== Key Helpers ====================

#[allow(dead_code)]
pub fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
        .unwrap();
}

#[allow(dead_code)]
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}
