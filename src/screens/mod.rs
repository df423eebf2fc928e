//! Screen views.
//!
//! Each [`ScreenId`] maps to one view. Views are built fresh when the router
//! mounts their screen.

pub mod auth_form;
pub mod content;
pub mod onboarding;
pub mod sample;
pub mod screen_trait;
pub mod system;

pub use auth_form::{AuthFormScreen, AuthMode};
pub use content::ContentScreen;
pub use onboarding::OnboardingScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
pub use system::{DebugScreen, LoadingScreen, OauthCallbackScreen};

use crate::router::Screen as ScreenId;

/// Build the view for a screen.
pub fn build(screen: ScreenId) -> Box<dyn Screen> {
    match screen {
        ScreenId::Loading => Box::new(LoadingScreen::new()),
        ScreenId::OauthCallback => Box::new(OauthCallbackScreen),
        ScreenId::Debug => Box::new(DebugScreen),
        ScreenId::SignIn => Box::new(AuthFormScreen::new(AuthMode::SignIn)),
        ScreenId::SignUp => Box::new(AuthFormScreen::new(AuthMode::SignUp)),
        ScreenId::Onboarding => Box::new(OnboardingScreen::new()),
        ScreenId::Welcome
        | ScreenId::Home
        | ScreenId::Schedule
        | ScreenId::Teams
        | ScreenId::Ratings
        | ScreenId::Chat
        | ScreenId::TeamDetail
        | ScreenId::MatchDetail
        | ScreenId::DivisionStandings
        | ScreenId::TeamSeasonReport
        | ScreenId::PlayerProfile
        | ScreenId::Payments
        | ScreenId::Notifications
        | ScreenId::Settings
        | ScreenId::LineupEditor
        | ScreenId::Analytics
        | ScreenId::RosterManagement
        | ScreenId::CourtBooking => Box::new(ContentScreen::new(screen)),
    }
}
