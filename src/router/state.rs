//! Navigation state owned by the controller.

use super::registry::SelectionKind;
use super::screen::{Screen, TabId, UserRole};
use serde::Serialize;

/// Selections detail screens depend on.
///
/// Set when the user picks an entry on a list screen; `navigate_to` merges
/// the fields that are present into the current context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavContext {
    pub team_id: Option<String>,
    pub match_id: Option<String>,
    pub division_id: Option<String>,
}

impl NavContext {
    /// Context holding a single selection.
    pub fn with(kind: SelectionKind, id: impl Into<String>) -> Self {
        let mut context = Self::default();
        *context.slot_mut(kind) = Some(id.into());
        context
    }

    pub fn get(&self, kind: SelectionKind) -> Option<&str> {
        match kind {
            SelectionKind::Team => self.team_id.as_deref(),
            SelectionKind::Match => self.match_id.as_deref(),
            SelectionKind::Division => self.division_id.as_deref(),
        }
    }

    pub fn has(&self, kind: SelectionKind) -> bool {
        self.get(kind).is_some()
    }

    fn slot_mut(&mut self, kind: SelectionKind) -> &mut Option<String> {
        match kind {
            SelectionKind::Team => &mut self.team_id,
            SelectionKind::Match => &mut self.match_id,
            SelectionKind::Division => &mut self.division_id,
        }
    }

    /// Overwrite the fields that `update` provides.
    pub fn merge(&mut self, update: NavContext) {
        if update.team_id.is_some() {
            self.team_id = update.team_id;
        }
        if update.match_id.is_some() {
            self.match_id = update.match_id;
        }
        if update.division_id.is_some() {
            self.division_id = update.division_id;
        }
    }
}

/// The router's mutable state.
///
/// Only [`NavigationController`](super::NavigationController) mutates this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub current_screen: Screen,
    pub active_tab: TabId,
    pub is_returning_user: bool,
    pub user_role: Option<UserRole>,
    pub onboarding_completed: bool,
    pub context: NavContext,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_screen: Screen::Loading,
            active_tab: TabId::Home,
            is_returning_user: false,
            user_role: None,
            onboarding_completed: false,
            context: NavContext::default(),
        }
    }
}

impl NavigationState {
    pub fn is_captain(&self) -> bool {
        self.user_role == Some(UserRole::Captain)
    }
}

/// Inputs the initial-screen derivation depends on.
///
/// A change to any field re-runs the derivation. `current_screen` is not
/// part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthSignals {
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub user_id: Option<String>,
    pub onboarding_completed: bool,
    /// `/auth/me` has answered for `user_id`.
    pub onboarding_known: bool,
}

impl AuthSignals {
    /// Signals before the auth collaborator has reported anything.
    pub fn initial() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// Auth is still resolving, including the onboarding lookup.
    pub fn is_resolving(&self) -> bool {
        self.is_loading || (self.is_authenticated && !self.onboarding_known)
    }
}
