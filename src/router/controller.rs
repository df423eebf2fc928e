//! Navigation controller.
//!
//! The controller is a reducer: every input is an [`Action`], every side
//! effect it wants is returned as an [`Effect`] for the caller to run.
//!
//! ```text
//! (NavigationState, AuthSignals) × Action → (NavigationState', AuthSignals', Vec<Effect>)
//! ```
//!
//! The initial screen is re-derived from the launch location and the auth
//! signals whenever one of them changes; plain navigation never triggers a
//! re-derivation.

use super::location::reserved_screen;
use super::registry::{self, BackTarget};
use super::screen::{Screen, TabId, UserRole};
use super::state::{AuthSignals, NavContext, NavigationState};
use crate::api::{ApiError, MeResponse, SyncUserRequest};
use crate::auth::{AuthState, AuthUser};
use tracing::{debug, error, info, warn};

/// Inputs to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The auth collaborator reported a new snapshot.
    AuthChanged(AuthState),
    /// The launch location changed.
    LocationChanged(String),
    /// A screen requested a transition.
    NavigateTo {
        screen: Screen,
        tab: Option<TabId>,
        context: Option<NavContext>,
    },
    /// Back button on the current screen.
    Back,
    /// `/auth/sync-user` finished.
    UserSynced {
        generation: u64,
        result: Result<(), ApiError>,
    },
    /// `/auth/me` finished.
    OnboardingStatusLoaded {
        generation: u64,
        result: Result<MeResponse, ApiError>,
    },
    /// Role picked on the onboarding screen.
    SelectRole(UserRole),
    /// Onboarding form submitted.
    CompleteOnboarding,
    /// `/auth/complete-onboarding` finished.
    OnboardingCompleted {
        generation: u64,
        result: Result<(), ApiError>,
    },
    /// Sign-in or sign-up finished; re-enter loading and re-derive.
    AuthFlowCompleted,
    /// User asked to sign out.
    SignOut,
    /// Restart the session lookup after a failure or a stall.
    RetryResolve,
    /// The resolve timeout armed for `generation` elapsed.
    ResolveTimedOut { generation: u64 },
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SyncUser {
        generation: u64,
        request: SyncUserRequest,
    },
    FetchOnboardingStatus {
        generation: u64,
        user_id: String,
    },
    CompleteOnboarding {
        generation: u64,
        user_id: String,
    },
    /// Sign out of the auth collaborator.
    SignOut,
    Notify(Notice),
    /// Schedule `Action::ResolveTimedOut { generation }`.
    ArmResolveTimeout { generation: u64 },
    /// Abort every in-flight request.
    CancelInFlight,
}

/// Where the session lookup for the current user stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No authenticated user.
    Idle,
    Syncing,
    FetchingStatus,
    Ready,
    /// A lookup step failed; waiting for a retry.
    Failed,
}

/// Pick the screen for a location and a set of auth signals.
///
/// Priority: reserved path, then loading, then completed onboarding, then
/// incomplete onboarding, then anonymous.
pub fn resolve_initial_screen(location: &str, signals: &AuthSignals) -> Screen {
    if let Some(screen) = reserved_screen(location) {
        return screen;
    }
    if signals.is_resolving() {
        Screen::Loading
    } else if signals.is_authenticated && signals.onboarding_completed {
        Screen::Home
    } else if signals.is_authenticated {
        Screen::Onboarding
    } else {
        Screen::Welcome
    }
}

/// Owner of [`NavigationState`].
#[derive(Debug)]
pub struct NavigationController {
    state: NavigationState,
    signals: AuthSignals,
    location: String,
    user: Option<AuthUser>,
    generation: u64,
    phase: SessionPhase,
    completing_onboarding: bool,
    stalled: bool,
    rederive_pending: bool,
}

impl NavigationController {
    /// Create a controller for the given launch location.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            state: NavigationState::default(),
            signals: AuthSignals::initial(),
            location: location.into(),
            user: None,
            generation: 0,
            phase: SessionPhase::Idle,
            completing_onboarding: false,
            stalled: false,
            rederive_pending: false,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_screen(&self) -> Screen {
        self.state.current_screen
    }

    pub fn signals(&self) -> &AuthSignals {
        &self.signals
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Generation stamped on auth-bound effects; results from older
    /// generations are dropped.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_completing_onboarding(&self) -> bool {
        self.completing_onboarding
    }

    /// The session lookup failed or exceeded the resolve timeout.
    pub fn is_stalled(&self) -> bool {
        self.stalled || self.phase == SessionPhase::Failed
    }

    /// Apply an action and return the effects it requests.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let mut effects = Vec::new();
        let signals_before = self.signals.clone();
        let location_before = self.location.clone();
        let auth_snapshot = matches!(action, Action::AuthChanged(_));

        match action {
            Action::AuthChanged(auth) => self.on_auth_changed(auth, &mut effects),
            Action::LocationChanged(location) => self.location = location,
            Action::NavigateTo {
                screen,
                tab,
                context,
            } => self.navigate_to(screen, tab, context, &mut effects),
            Action::Back => self.back(&mut effects),
            Action::UserSynced { generation, result } => {
                if self.is_current(generation, "sync-user") {
                    self.on_user_synced(result, &mut effects);
                }
            }
            Action::OnboardingStatusLoaded { generation, result } => {
                if self.is_current(generation, "me") {
                    self.on_status_loaded(result, &mut effects);
                }
            }
            Action::SelectRole(role) => {
                debug!("Role selected: {:?}", role);
                self.state.user_role = Some(role);
            }
            Action::CompleteOnboarding => self.complete_onboarding(&mut effects),
            Action::OnboardingCompleted { generation, result } => {
                if self.is_current(generation, "complete-onboarding") {
                    self.on_onboarding_completed(result, &mut effects);
                }
            }
            Action::AuthFlowCompleted => {
                info!("Auth flow completed, re-deriving screen");
                self.state.current_screen = Screen::Loading;
                self.rederive_pending = true;
            }
            Action::SignOut => {
                info!("Signing out");
                self.reset_session(&mut effects);
            }
            Action::RetryResolve => self.retry_resolve(&mut effects),
            Action::ResolveTimedOut { generation } => self.on_resolve_timeout(generation, &mut effects),
        }

        let derive = self.signals != signals_before || self.location != location_before;
        // A pending re-derivation waits for the next auth snapshot
        let pending = auth_snapshot && self.rederive_pending && !self.signals.is_resolving();
        if derive || pending {
            self.rederive_pending = false;
            self.rederive();
        }

        effects
    }

    fn is_current(&self, generation: u64, what: &str) -> bool {
        if generation == self.generation {
            true
        } else {
            debug!(
                "Dropping stale {} result (generation {}, current {})",
                what, generation, self.generation
            );
            false
        }
    }

    /// Re-run the initial-screen derivation.
    fn rederive(&mut self) {
        let screen = resolve_initial_screen(&self.location, &self.signals);
        self.state.onboarding_completed = self.signals.onboarding_completed;

        match screen {
            Screen::Home => {
                self.state.is_returning_user = true;
                self.state.active_tab = TabId::Home;
            }
            Screen::Onboarding => self.state.is_returning_user = false,
            _ => {}
        }

        if screen != self.state.current_screen {
            info!("Routing {} -> {}", self.state.current_screen, screen);
        }
        self.state.current_screen = screen;
    }

    fn on_auth_changed(&mut self, auth: AuthState, effects: &mut Vec<Effect>) {
        let user = if auth.is_authenticated { auth.user } else { None };
        let user_id = user.as_ref().map(|u| u.id.clone());

        self.signals.is_loading = auth.is_loading;
        self.signals.is_authenticated = user.is_some();

        if user_id != self.signals.user_id {
            self.generation += 1;
            effects.push(Effect::CancelInFlight);

            self.signals.user_id = user_id;
            self.signals.onboarding_completed = false;
            self.signals.onboarding_known = false;
            self.state.user_role = None;
            self.state.context = NavContext::default();
            self.completing_onboarding = false;
            self.stalled = false;

            match &user {
                Some(user) => {
                    info!("Authenticated as {}", user.id);
                    self.start_sync(user, effects);
                }
                None => self.phase = SessionPhase::Idle,
            }
        }

        self.user = user;
    }

    fn start_sync(&mut self, user: &AuthUser, effects: &mut Vec<Effect>) {
        self.phase = SessionPhase::Syncing;
        effects.push(Effect::SyncUser {
            generation: self.generation,
            request: SyncUserRequest {
                stack_user_id: user.id.clone(),
                email: user.email.clone(),
                display_name: user.display_name(),
            },
        });
        effects.push(Effect::ArmResolveTimeout {
            generation: self.generation,
        });
    }

    fn on_user_synced(&mut self, result: Result<(), ApiError>, effects: &mut Vec<Effect>) {
        match result {
            Ok(()) => {
                let Some(user_id) = self.signals.user_id.clone() else {
                    return;
                };
                debug!("User synced, fetching onboarding status");
                self.phase = SessionPhase::FetchingStatus;
                effects.push(Effect::FetchOnboardingStatus {
                    generation: self.generation,
                    user_id,
                });
            }
            Err(e) => {
                warn!("Failed to sync user: {}", e);
                self.phase = SessionPhase::Failed;
                effects.push(Effect::Notify(Notice::error(format!(
                    "Couldn't sync your account: {}",
                    e.user_message()
                ))));
            }
        }
    }

    fn on_status_loaded(&mut self, result: Result<MeResponse, ApiError>, effects: &mut Vec<Effect>) {
        match result {
            Ok(me) => {
                debug!("Onboarding status: completed={}", me.onboarding_completed);
                self.phase = SessionPhase::Ready;
                self.stalled = false;
                self.signals.onboarding_completed = me.onboarding_completed;
                self.signals.onboarding_known = true;
                if me.role.is_some() {
                    self.state.user_role = me.role;
                }
            }
            Err(e) if e.is_not_found() => {
                error!("Signed-in user unknown to the backend, forcing sign-out");
                effects.push(Effect::Notify(Notice::error(
                    "Your session is no longer valid. Please sign in again.",
                )));
                self.reset_session(effects);
            }
            Err(e) => {
                warn!("Failed to fetch onboarding status: {}", e);
                self.phase = SessionPhase::Failed;
                effects.push(Effect::Notify(Notice::error(format!(
                    "Couldn't load your account: {}",
                    e.user_message()
                ))));
            }
        }
    }

    fn complete_onboarding(&mut self, effects: &mut Vec<Effect>) {
        if self.completing_onboarding {
            debug!("Onboarding completion already in flight");
            return;
        }
        let Some(user_id) = self.signals.user_id.clone() else {
            warn!("Onboarding submitted without a signed-in user");
            return;
        };
        if self.state.user_role.is_none() {
            self.state.user_role = Some(UserRole::Player);
        }

        info!("Completing onboarding for {}", user_id);
        self.completing_onboarding = true;
        effects.push(Effect::CompleteOnboarding {
            generation: self.generation,
            user_id,
        });
    }

    fn on_onboarding_completed(&mut self, result: Result<(), ApiError>, effects: &mut Vec<Effect>) {
        self.completing_onboarding = false;
        match result {
            Ok(()) => {
                info!("Onboarding completed");
                self.signals.onboarding_completed = true;
                self.signals.onboarding_known = true;
                effects.push(Effect::Notify(Notice::success("You're all set!")));
            }
            Err(e) => {
                warn!("Failed to complete onboarding: {}", e);
                effects.push(Effect::Notify(Notice::error(format!(
                    "Couldn't finish onboarding: {}",
                    e.user_message()
                ))));
            }
        }
    }

    /// Drop the session and everything derived from it.
    fn reset_session(&mut self, effects: &mut Vec<Effect>) {
        self.generation += 1;
        effects.push(Effect::CancelInFlight);
        effects.push(Effect::SignOut);

        self.signals = AuthSignals::default();
        self.user = None;
        self.phase = SessionPhase::Idle;
        self.completing_onboarding = false;
        self.stalled = false;
        self.state.user_role = None;
        self.state.is_returning_user = false;
        self.state.context = NavContext::default();
    }

    fn retry_resolve(&mut self, effects: &mut Vec<Effect>) {
        if !self.signals.is_authenticated || self.signals.onboarding_known {
            debug!("Nothing to retry");
            return;
        }
        let Some(user) = self.user.clone() else {
            return;
        };

        info!("Retrying session lookup");
        self.generation += 1;
        self.stalled = false;
        effects.push(Effect::CancelInFlight);
        self.start_sync(&user, effects);
    }

    fn on_resolve_timeout(&mut self, generation: u64, effects: &mut Vec<Effect>) {
        if generation != self.generation
            || self.state.current_screen != Screen::Loading
            || !self.signals.is_resolving()
        {
            return;
        }
        warn!("Session lookup still pending after timeout");
        self.stalled = true;
        effects.push(Effect::Notify(Notice::warning(
            "Still waiting for the server. Press r to retry.",
        )));
    }

    fn navigate_to(
        &mut self,
        screen: Screen,
        mut tab: Option<TabId>,
        context: Option<NavContext>,
        effects: &mut Vec<Effect>,
    ) {
        if let Some(context) = context {
            self.state.context.merge(context);
        }

        let mut target = screen;
        if let Some(pre) = registry::spec(screen).prerequisite {
            if !self.state.context.has(pre.needs) {
                warn!(
                    "{} opened without a {:?} selection, showing {} instead",
                    screen, pre.needs, pre.fallback
                );
                effects.push(Effect::Notify(Notice::warning(format!(
                    "Pick a {} first",
                    match pre.needs {
                        registry::SelectionKind::Team => "team",
                        registry::SelectionKind::Match => "match",
                        registry::SelectionKind::Division => "division",
                    }
                ))));
                target = pre.fallback;
                tab = registry::spec(target).tab().or(tab);
            }
        }

        if target != self.state.current_screen {
            info!("Navigate {} -> {}", self.state.current_screen, target);
        }
        self.state.current_screen = target;
        if let Some(tab) = tab {
            self.state.active_tab = tab;
        }
    }

    fn back(&mut self, effects: &mut Vec<Effect>) {
        let (screen, tab) = match registry::spec(self.state.current_screen).back {
            BackTarget::None => return,
            BackTarget::Screen(screen) => (screen, registry::spec(screen).tab()),
            BackTarget::ActiveTab => (self.state.active_tab.screen(), Some(self.state.active_tab)),
        };
        self.navigate_to(screen, tab, None, effects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UserMetadata;

    fn user(id: &str) -> AuthUser {
        AuthUser {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            user_metadata: UserMetadata::default(),
        }
    }

    fn signals(is_loading: bool, is_authenticated: bool, completed: bool) -> AuthSignals {
        AuthSignals {
            is_loading,
            is_authenticated,
            user_id: is_authenticated.then(|| "u1".to_string()),
            onboarding_completed: completed,
            onboarding_known: is_authenticated,
        }
    }

    /// Controller for `u1` with the onboarding lookup answered.
    fn signed_in(location: &str, completed: bool) -> NavigationController {
        let mut controller = NavigationController::new(location);
        controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u1"))));
        let generation = controller.generation();
        controller.dispatch(Action::UserSynced {
            generation,
            result: Ok(()),
        });
        controller.dispatch(Action::OnboardingStatusLoaded {
            generation,
            result: Ok(MeResponse {
                onboarding_completed: completed,
                role: None,
            }),
        });
        controller
    }

    fn not_found() -> ApiError {
        ApiError::NotFound {
            endpoint: "/auth/me".to_string(),
        }
    }

    #[test]
    fn test_resolution_priority() {
        assert_eq!(resolve_initial_screen("/", &signals(true, false, false)), Screen::Loading);
        assert_eq!(resolve_initial_screen("/", &signals(false, true, true)), Screen::Home);
        assert_eq!(resolve_initial_screen("/", &signals(false, true, false)), Screen::Onboarding);
        assert_eq!(resolve_initial_screen("/", &signals(false, false, false)), Screen::Welcome);
        assert_eq!(resolve_initial_screen("/debug", &signals(false, true, true)), Screen::Debug);
        assert_eq!(
            resolve_initial_screen("/auth/callback", &signals(true, false, false)),
            Screen::OauthCallback
        );
    }

    #[test]
    fn test_resolution_always_lands_on_an_entry_screen() {
        let allowed = [
            Screen::Loading,
            Screen::OauthCallback,
            Screen::Debug,
            Screen::Welcome,
            Screen::Onboarding,
            Screen::Home,
        ];
        for location in ["/", "/debug", "/auth/callback", "/teams"] {
            for bits in 0..32u8 {
                let s = AuthSignals {
                    is_loading: bits & 1 != 0,
                    is_authenticated: bits & 2 != 0,
                    user_id: (bits & 4 != 0).then(|| "u1".to_string()),
                    onboarding_completed: bits & 8 != 0,
                    onboarding_known: bits & 16 != 0,
                };
                assert!(allowed.contains(&resolve_initial_screen(location, &s)));
            }
        }
    }

    #[test]
    fn test_new_controller_starts_on_loading() {
        let controller = NavigationController::new("/");
        assert_eq!(controller.current_screen(), Screen::Loading);
    }

    #[test]
    fn test_anonymous_lands_on_welcome() {
        let mut controller = NavigationController::new("/");
        let effects = controller.dispatch(Action::AuthChanged(AuthState::anonymous()));
        assert_eq!(controller.current_screen(), Screen::Welcome);
        assert!(!effects.iter().any(|e| matches!(e, Effect::SyncUser { .. })));
    }

    #[test]
    fn test_authenticated_user_stays_loading_until_status_known() {
        let mut controller = NavigationController::new("/");
        let effects = controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u1"))));
        assert_eq!(controller.current_screen(), Screen::Loading);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::SyncUser { request, .. } if request.stack_user_id == "u1" && request.display_name == "u1"
        )));
        assert!(effects.iter().any(|e| matches!(e, Effect::ArmResolveTimeout { .. })));

        let generation = controller.generation();
        let effects = controller.dispatch(Action::UserSynced {
            generation,
            result: Ok(()),
        });
        assert_eq!(controller.phase(), SessionPhase::FetchingStatus);
        assert_eq!(
            effects,
            vec![Effect::FetchOnboardingStatus {
                generation,
                user_id: "u1".to_string()
            }]
        );
        assert_eq!(controller.current_screen(), Screen::Loading);
    }

    #[test]
    fn test_returning_user_goes_home() {
        let controller = signed_in("/", true);
        assert_eq!(controller.current_screen(), Screen::Home);
        assert!(controller.state().is_returning_user);
        assert!(controller.state().onboarding_completed);
    }

    #[test]
    fn test_new_user_goes_to_onboarding() {
        let controller = signed_in("/", false);
        assert_eq!(controller.current_screen(), Screen::Onboarding);
        assert!(!controller.state().is_returning_user);
    }

    #[test]
    fn test_debug_path_beats_home() {
        let controller = signed_in("/debug", true);
        assert_eq!(controller.current_screen(), Screen::Debug);
    }

    #[test]
    fn test_leaving_debug_path_rederives() {
        let mut controller = signed_in("/debug", true);
        controller.dispatch(Action::LocationChanged("/".to_string()));
        assert_eq!(controller.current_screen(), Screen::Home);
    }

    #[test]
    fn test_navigate_to_is_idempotent() {
        let mut controller = signed_in("/", true);
        let action = Action::NavigateTo {
            screen: Screen::Schedule,
            tab: Some(TabId::Schedule),
            context: None,
        };
        controller.dispatch(action.clone());
        let first = controller.state().clone();
        controller.dispatch(action);
        assert_eq!(controller.state(), &first);
        assert_eq!(first.current_screen, Screen::Schedule);
        assert_eq!(first.active_tab, TabId::Schedule);
    }

    #[test]
    fn test_navigate_without_tab_keeps_active_tab() {
        let mut controller = signed_in("/", true);
        controller.dispatch(Action::NavigateTo {
            screen: Screen::Ratings,
            tab: Some(TabId::Ratings),
            context: None,
        });
        controller.dispatch(Action::NavigateTo {
            screen: Screen::PlayerProfile,
            tab: None,
            context: None,
        });
        assert_eq!(controller.state().active_tab, TabId::Ratings);
    }

    #[test]
    fn test_navigation_does_not_rederive() {
        let mut controller = signed_in("/", true);
        controller.dispatch(Action::NavigateTo {
            screen: Screen::Teams,
            tab: Some(TabId::Teams),
            context: None,
        });
        // Same snapshot again: signals unchanged, screen stays.
        controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u1"))));
        assert_eq!(controller.current_screen(), Screen::Teams);
    }

    #[test]
    fn test_back_uses_fixed_targets() {
        let mut controller = signed_in("/", true);
        controller.dispatch(Action::NavigateTo {
            screen: Screen::Schedule,
            tab: Some(TabId::Schedule),
            context: None,
        });
        controller.dispatch(Action::NavigateTo {
            screen: Screen::TeamDetail,
            tab: None,
            context: Some(NavContext::with(registry::SelectionKind::Team, "thunder")),
        });
        controller.dispatch(Action::Back);
        assert_eq!(controller.current_screen(), Screen::Teams);
        assert_eq!(controller.state().active_tab, TabId::Teams);
    }

    #[test]
    fn test_match_detail_backs_into_active_tab() {
        let mut controller = signed_in("/", true);
        controller.dispatch(Action::NavigateTo {
            screen: Screen::Ratings,
            tab: Some(TabId::Ratings),
            context: None,
        });
        controller.dispatch(Action::NavigateTo {
            screen: Screen::MatchDetail,
            tab: None,
            context: Some(NavContext::with(registry::SelectionKind::Match, "week-3")),
        });
        controller.dispatch(Action::Back);
        assert_eq!(controller.current_screen(), Screen::Ratings);
    }

    #[test]
    fn test_back_on_tab_root_is_noop() {
        let mut controller = signed_in("/", true);
        let before = controller.state().clone();
        let effects = controller.dispatch(Action::Back);
        assert!(effects.is_empty());
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_season_report_without_division_falls_back() {
        let mut controller = signed_in("/", true);
        let effects = controller.dispatch(Action::NavigateTo {
            screen: Screen::TeamSeasonReport,
            tab: None,
            context: Some(NavContext::with(registry::SelectionKind::Team, "thunder")),
        });
        assert_eq!(controller.current_screen(), Screen::DivisionStandings);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Notify(Notice { level: NoticeLevel::Warning, .. })
        )));

        controller.dispatch(Action::NavigateTo {
            screen: Screen::DivisionStandings,
            tab: None,
            context: Some(NavContext::with(registry::SelectionKind::Division, "div-a")),
        });
        let effects = controller.dispatch(Action::NavigateTo {
            screen: Screen::TeamSeasonReport,
            tab: None,
            context: None,
        });
        assert!(effects.is_empty());
        assert_eq!(controller.current_screen(), Screen::TeamSeasonReport);
    }

    #[test]
    fn test_fallback_to_tab_root_switches_tab() {
        let mut controller = signed_in("/", true);
        assert_eq!(controller.state().active_tab, TabId::Home);

        controller.dispatch(Action::NavigateTo {
            screen: Screen::MatchDetail,
            tab: None,
            context: None,
        });
        assert_eq!(controller.current_screen(), Screen::Schedule);
        assert_eq!(controller.state().active_tab, TabId::Schedule);

        // An explicit tab is replaced by the fallback's own tab
        controller.dispatch(Action::NavigateTo {
            screen: Screen::TeamDetail,
            tab: Some(TabId::Chat),
            context: None,
        });
        assert_eq!(controller.current_screen(), Screen::Teams);
        assert_eq!(controller.state().active_tab, TabId::Teams);
    }

    #[test]
    fn test_auth_flow_completed_holds_loading_until_snapshot() {
        let mut controller = NavigationController::new("/");
        controller.dispatch(Action::AuthChanged(AuthState::anonymous()));
        controller.dispatch(Action::AuthFlowCompleted);
        assert_eq!(controller.current_screen(), Screen::Loading);

        // Unrelated actions do not consume the pending re-derivation
        controller.dispatch(Action::SelectRole(UserRole::Player));
        controller.dispatch(Action::RetryResolve);
        assert_eq!(controller.current_screen(), Screen::Loading);

        controller.dispatch(Action::AuthChanged(AuthState::anonymous()));
        assert_eq!(controller.current_screen(), Screen::Welcome);
    }

    #[test]
    fn test_onboarding_completion_gated_on_success() {
        let mut controller = signed_in("/", false);
        controller.dispatch(Action::SelectRole(UserRole::Captain));
        let effects = controller.dispatch(Action::CompleteOnboarding);
        assert!(matches!(effects.as_slice(), [Effect::CompleteOnboarding { user_id, .. }] if user_id == "u1"));
        assert!(controller.is_completing_onboarding());

        let generation = controller.generation();
        let effects = controller.dispatch(Action::OnboardingCompleted {
            generation,
            result: Err(ApiError::Status {
                endpoint: "/auth/complete-onboarding".to_string(),
                status: 500,
                body: String::new(),
            }),
        });
        assert_eq!(controller.current_screen(), Screen::Onboarding);
        assert!(!controller.state().onboarding_completed);
        assert!(!controller.is_completing_onboarding());
        // No automatic retry
        assert!(!effects.iter().any(|e| matches!(e, Effect::CompleteOnboarding { .. })));

        controller.dispatch(Action::CompleteOnboarding);
        controller.dispatch(Action::OnboardingCompleted {
            generation,
            result: Ok(()),
        });
        assert_eq!(controller.current_screen(), Screen::Home);
        assert!(controller.state().onboarding_completed);
        assert!(controller.state().is_captain());
    }

    #[test]
    fn test_double_submit_sends_once() {
        let mut controller = signed_in("/", false);
        assert_eq!(controller.dispatch(Action::CompleteOnboarding).len(), 1);
        assert!(controller.dispatch(Action::CompleteOnboarding).is_empty());
    }

    #[test]
    fn test_me_not_found_forces_sign_out() {
        let mut controller = NavigationController::new("/");
        controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u1"))));
        let generation = controller.generation();
        controller.dispatch(Action::UserSynced {
            generation,
            result: Ok(()),
        });
        let effects = controller.dispatch(Action::OnboardingStatusLoaded {
            generation,
            result: Err(not_found()),
        });
        assert!(effects.contains(&Effect::SignOut));
        assert_eq!(controller.current_screen(), Screen::Welcome);
        assert!(!controller.signals().is_authenticated);
        assert!(controller.user().is_none());
    }

    #[test]
    fn test_sync_failure_stays_loading_and_retry_restarts() {
        let mut controller = NavigationController::new("/");
        controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u1"))));
        let generation = controller.generation();
        let effects = controller.dispatch(Action::UserSynced {
            generation,
            result: Err(ApiError::Transport {
                endpoint: "/auth/sync-user".to_string(),
                message: "connection refused".to_string(),
            }),
        });
        assert_eq!(controller.current_screen(), Screen::Loading);
        assert!(controller.is_stalled());
        assert!(matches!(effects.as_slice(), [Effect::Notify(Notice { level: NoticeLevel::Error, .. })]));

        let effects = controller.dispatch(Action::RetryResolve);
        assert!(controller.generation() > generation);
        assert!(effects.iter().any(|e| matches!(e, Effect::SyncUser { .. })));
        assert_eq!(controller.phase(), SessionPhase::Syncing);
    }

    #[test]
    fn test_stale_results_are_ignored() {
        let mut controller = NavigationController::new("/");
        controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u1"))));
        let old_generation = controller.generation();
        controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u2"))));

        let before = controller.state().clone();
        let effects = controller.dispatch(Action::OnboardingStatusLoaded {
            generation: old_generation,
            result: Ok(MeResponse {
                onboarding_completed: true,
                role: Some(UserRole::Captain),
            }),
        });
        assert!(effects.is_empty());
        assert_eq!(controller.state(), &before);
        assert_eq!(controller.current_screen(), Screen::Loading);
    }

    #[test]
    fn test_resolve_timeout_marks_stalled() {
        let mut controller = NavigationController::new("/");
        controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u1"))));
        let generation = controller.generation();

        assert!(controller
            .dispatch(Action::ResolveTimedOut {
                generation: generation - 1
            })
            .is_empty());
        assert!(!controller.is_stalled());

        let effects = controller.dispatch(Action::ResolveTimedOut { generation });
        assert!(controller.is_stalled());
        assert_eq!(controller.current_screen(), Screen::Loading);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_auth_flow_completed_reenters_loading() {
        let mut controller = NavigationController::new("/");
        controller.dispatch(Action::AuthChanged(AuthState::anonymous()));
        controller.dispatch(Action::NavigateTo {
            screen: Screen::SignIn,
            tab: None,
            context: None,
        });
        controller.dispatch(Action::AuthFlowCompleted);
        assert_eq!(controller.current_screen(), Screen::Loading);

        controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u1"))));
        assert_eq!(controller.current_screen(), Screen::Loading);
        assert_eq!(controller.phase(), SessionPhase::Syncing);
    }

    #[test]
    fn test_auth_flow_completed_with_unchanged_signals_still_rederives() {
        let mut controller = NavigationController::new("/");
        controller.dispatch(Action::AuthChanged(AuthState::anonymous()));
        controller.dispatch(Action::AuthFlowCompleted);
        controller.dispatch(Action::AuthChanged(AuthState::anonymous()));
        assert_eq!(controller.current_screen(), Screen::Welcome);
    }

    #[test]
    fn test_sign_out_returns_to_welcome() {
        let mut controller = signed_in("/", true);
        let effects = controller.dispatch(Action::SignOut);
        assert!(effects.contains(&Effect::SignOut));
        assert!(effects.contains(&Effect::CancelInFlight));
        assert_eq!(controller.current_screen(), Screen::Welcome);
        assert_eq!(controller.state().user_role, None);
    }

    #[test]
    fn test_role_from_backend_applied() {
        let mut controller = NavigationController::new("/");
        controller.dispatch(Action::AuthChanged(AuthState::signed_in(user("u1"))));
        let generation = controller.generation();
        controller.dispatch(Action::UserSynced {
            generation,
            result: Ok(()),
        });
        controller.dispatch(Action::OnboardingStatusLoaded {
            generation,
            result: Ok(MeResponse {
                onboarding_completed: true,
                role: Some(UserRole::Captain),
            }),
        });
        assert!(controller.state().is_captain());
    }

    #[test]
    fn test_non_captain_never_autorouted_to_captain_tools() {
        for completed in [true, false] {
            for location in ["/", "/debug", "/auth/callback"] {
                let mut controller = signed_in(location, completed);
                assert!(!registry::spec(controller.current_screen()).captain_only);
                controller.dispatch(Action::Back);
                assert!(!registry::spec(controller.current_screen()).captain_only);
            }
        }
    }
}
