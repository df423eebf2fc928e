//! Screen trait and associated types.
//!
//! Screens own their local view state (cursor, form fields) and never touch
//! navigation state: they read it through a context and answer events with a
//! [`ScreenAction`] that the app turns into a controller action.

use crate::auth::AuthUser;
use crate::config::Config;
use crate::router::{NavContext, NavigationController, Screen as ScreenId, TabId, UserRole};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only view of the app handed to screens.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
    pub controller: &'a NavigationController,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, controller: &'a NavigationController) -> Self {
        Self { config, controller }
    }

    pub fn is_captain(&self) -> bool {
        self.controller.state().is_captain()
    }

    pub fn user(&self) -> Option<&'a AuthUser> {
        self.controller.user()
    }

    pub fn nav_context(&self) -> &'a NavContext {
        &self.controller.state().context
    }
}

/// Context for rendering; same view as [`ScreenContext`].
pub type RenderContext<'a> = ScreenContext<'a>;

/// Actions that a screen can return after handling an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenAction {
    /// No action needed, stay on current screen.
    #[default]
    None,
    /// Go to a screen, optionally switching tab and recording a selection.
    Navigate {
        screen: ScreenId,
        tab: Option<TabId>,
        context: Option<NavContext>,
    },
    /// Follow the screen's back target.
    Back,
    SelectRole(UserRole),
    CompleteOnboarding,
    SignIn {
        email: String,
    },
    SignUp {
        email: String,
        display_name: String,
    },
    SignOut,
    /// Retry the session lookup.
    Retry,
    /// Replace the launch location.
    SetLocation(String),
    Quit,
}

impl ScreenAction {
    pub fn navigate(screen: ScreenId) -> Self {
        Self::Navigate {
            screen,
            tab: None,
            context: None,
        }
    }
}

/// Trait for screen views.
pub trait Screen {
    /// Render the screen body (everything between header and footer).
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle a key press.
    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Key hints for the footer.
    fn hints(&self, _ctx: &ScreenContext) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Check if a text input is currently focused.
    ///
    /// When true, global shortcuts (quit, tab switching) are disabled so
    /// users can type freely.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called when the screen is mounted.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }
}
