use crate::api::LeagueApi;
use crate::auth::AuthProvider;
use crate::components::{Footer, Header};
use crate::config::Config;
use crate::router::{
    registry, Action, Effect, NavigationController, Notice, Screen as ScreenId, Shell, TabId,
};
use crate::screens::{self, Screen, ScreenAction, ScreenContext};
use crate::services::EffectRunner;
use crate::tui::Tui;
use crate::widgets::{TabBar, ToastManager};
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

/// Main application state
pub struct App {
    config: Config,
    controller: NavigationController,
    auth: Box<dyn AuthProvider>,
    toasts: ToastManager,
    view: Box<dyn Screen>,
    mounted: ScreenId,
    should_quit: bool,
    // Dropped before the runtime so in-flight tasks are aborted first
    runner: EffectRunner,
    runtime: Runtime,
}

impl App {
    pub fn new(
        config: Config,
        auth: Box<dyn AuthProvider>,
        api: Arc<dyn LeagueApi>,
        location: &str,
    ) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let runner = EffectRunner::new(api, runtime.handle().clone(), config.resolve_timeout());
        let controller = NavigationController::new(location);
        let mounted = controller.current_screen();

        Ok(Self {
            toasts: ToastManager::new(config.toast_duration()),
            config,
            controller,
            auth,
            view: screens::build(mounted),
            mounted,
            should_quit: false,
            runner,
            runtime,
        })
    }

    /// Feed the current auth snapshot to the router.
    pub fn start(&mut self) {
        info!("Starting at {}", self.controller.location());
        let auth = self.auth.state();
        self.dispatch(Action::AuthChanged(auth));
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the TUI until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.start();

        let result = self.event_loop(&mut tui);
        tui.exit()?;
        result
    }

    fn event_loop(&mut self, tui: &mut Tui) -> Result<()> {
        loop {
            let mut drawn = Ok(());
            tui.draw(|frame| drawn = self.render(frame))?;
            drawn?;

            if self.should_quit {
                break;
            }

            // Poll for events with 250ms timeout
            if let Some(Event::Key(key)) = tui.poll_event(Duration::from_millis(250))? {
                self.handle_key(key)?;
            }

            self.pump();
            self.toasts.tick();
        }
        Ok(())
    }

    /// Apply an action and run the effects it produces.
    pub fn dispatch(&mut self, action: Action) {
        let effects = self.controller.dispatch(action);
        for effect in self.runner.run(effects) {
            match effect {
                Effect::SignOut => {
                    if let Err(e) = self.auth.sign_out() {
                        error!("Failed to sign out: {:#}", e);
                        self.toasts.notify(Notice::error(format!("Sign-out failed: {}", e)));
                    }
                }
                Effect::Notify(notice) => self.toasts.notify(notice),
                other => debug!("Unhandled effect {:?}", other),
            }
        }
        self.sync_view();
    }

    /// Dispatch every action the effect runner has ready.
    pub fn pump(&mut self) {
        for action in self.runner.drain() {
            self.dispatch(action);
        }
    }

    /// Block until no effect result arrives for `idle`.
    pub fn settle(&mut self, idle: Duration) {
        loop {
            let runner = &mut self.runner;
            // The timer has to be created inside the runtime
            let next = self
                .runtime
                .block_on(async { tokio::time::timeout(idle, runner.next_action()).await });
            match next {
                Ok(Some(action)) => self.dispatch(action),
                _ => break,
            }
        }
    }

    /// Mount the view for the router's current screen if it changed.
    fn sync_view(&mut self) {
        let current = self.controller.current_screen();
        if current == self.mounted {
            return;
        }
        debug!("Mounting {} (was {})", current, self.mounted);
        self.view = screens::build(current);
        self.mounted = current;

        let ctx = ScreenContext::new(&self.config, &self.controller);
        if let Err(e) = self.view.on_enter(&ctx) {
            warn!("Failed to enter {}: {:#}", current, e);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        if !self.view.is_input_focused() {
            if let Some(action) = self.global_key(key) {
                self.apply(action);
                return Ok(());
            }
        }

        let ctx = ScreenContext::new(&self.config, &self.controller);
        let action = self.view.handle_key(key, &ctx)?;
        self.apply(action);
        Ok(())
    }

    /// Quit, back and tab switching.
    fn global_key(&self, key: KeyEvent) -> Option<ScreenAction> {
        let spec = registry::spec(self.mounted);
        let tab_switch = |tab: TabId| ScreenAction::Navigate {
            screen: tab.screen(),
            tab: Some(tab),
            context: None,
        };

        match (key.code, spec.shell) {
            (KeyCode::Char('q'), _) => Some(ScreenAction::Quit),
            (KeyCode::Esc | KeyCode::Backspace, _) if spec.show_back() => Some(ScreenAction::Back),
            (KeyCode::Tab, Shell::Tabbed(tab)) => Some(tab_switch(tab.next())),
            (KeyCode::BackTab, Shell::Tabbed(tab)) => Some(tab_switch(tab.prev())),
            (KeyCode::Char(c @ '1'..='5'), Shell::Tabbed(_)) => {
                let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
                TabId::ALL.get(index).copied().map(tab_switch)
            }
            _ => None,
        }
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Navigate {
                screen,
                tab,
                context,
            } => self.dispatch(Action::NavigateTo {
                screen,
                tab,
                context,
            }),
            ScreenAction::Back => self.dispatch(Action::Back),
            ScreenAction::SelectRole(role) => self.dispatch(Action::SelectRole(role)),
            ScreenAction::CompleteOnboarding => self.dispatch(Action::CompleteOnboarding),
            ScreenAction::SignIn { email } => {
                let result = self.auth.sign_in(&email);
                self.finish_auth_flow(result.map(|_| ()));
            }
            ScreenAction::SignUp {
                email,
                display_name,
            } => {
                let result = self.auth.sign_up(&email, &display_name);
                self.finish_auth_flow(result.map(|_| ()));
            }
            ScreenAction::SignOut => self.dispatch(Action::SignOut),
            ScreenAction::Retry => self.dispatch(Action::RetryResolve),
            ScreenAction::SetLocation(location) => self.dispatch(Action::LocationChanged(location)),
            ScreenAction::Quit => self.should_quit = true,
        }
    }

    fn finish_auth_flow(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                self.dispatch(Action::AuthFlowCompleted);
                let auth = self.auth.state();
                self.dispatch(Action::AuthChanged(auth));
            }
            Err(e) => {
                warn!("Auth flow failed: {:#}", e);
                self.toasts.notify(Notice::error(e.to_string()));
            }
        }
    }

    /// Draw the mounted screen with its chrome.
    pub fn render(&mut self, frame: &mut Frame) -> Result<()> {
        let spec = registry::spec(self.mounted);
        let tabbed = matches!(spec.shell, Shell::Tabbed(_));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(if tabbed { 2 } else { 0 }),
                Constraint::Length(2),
            ])
            .split(frame.area());

        let badge = self.controller.user().map(|user| {
            match self.controller.state().user_role {
                Some(role) => format!("{} · {}", user.display_name(), role.label()),
                None => user.display_name(),
            }
        });
        Header::render(
            frame,
            chunks[0],
            spec.title,
            spec.description,
            badge.as_deref(),
            spec.show_back(),
        );

        let ctx = ScreenContext::new(&self.config, &self.controller);
        self.view.render(frame, chunks[1], &ctx)?;

        if tabbed {
            frame.render_widget(TabBar::new(self.controller.state().active_tab), chunks[2]);
        }

        let mut hints = self.view.hints(&ctx);
        if !self.view.is_input_focused() {
            if spec.show_back() {
                hints.push(("Back", "Esc"));
            }
            if tabbed {
                hints.push(("Tabs", "1-5"));
            }
            hints.push(("Quit", "q"));
        }
        Footer::render(frame, chunks[3], &hints);

        self.toasts.render(frame, chunks[1]);
        Ok(())
    }
}
