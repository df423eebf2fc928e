//! Onboarding: pick a role, then finish.

use super::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::router::UserRole;
use crate::styles::theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const ROLES: [(UserRole, &str); 2] = [
    (UserRole::Player, "I play on a team"),
    (UserRole::Captain, "I captain a team: lineups, roster and court bookings"),
];

#[derive(Debug, Default)]
pub struct OnboardingScreen {
    selected: usize,
}

impl OnboardingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn role(&self) -> UserRole {
        ROLES[self.selected % ROLES.len()].0
    }

    fn select(&mut self, index: usize) -> ScreenAction {
        self.selected = index % ROLES.len();
        ScreenAction::SelectRole(self.role())
    }
}

impl Screen for OnboardingScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let name = ctx.user().map(|u| u.display_name()).unwrap_or_default();

        let mut lines = vec![
            Line::from(Span::styled(format!("Welcome, {}!", name), t.title_style())),
            Line::from(""),
            Line::from(Span::styled("How will you use Courtside?", t.text_style())),
            Line::from(""),
        ];
        for (i, (role, blurb)) in ROLES.iter().enumerate() {
            let marker = if i == self.selected { "(•)" } else { "( )" };
            let style = if i == self.selected {
                t.highlight_style()
            } else {
                t.text_style()
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} {} ", marker, role.label()), style),
                Span::styled(format!("  {}", blurb), t.muted_style()),
            ]));
        }
        lines.push(Line::from(""));
        if ctx.controller.is_completing_onboarding() {
            lines.push(Line::from(Span::styled("Saving…", t.key_style())));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::NONE)),
            area,
        );
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> Result<ScreenAction> {
        if ctx.controller.is_completing_onboarding() {
            return Ok(ScreenAction::None);
        }
        match key.code {
            KeyCode::Up | KeyCode::Left => Ok(self.select(self.selected + ROLES.len() - 1)),
            KeyCode::Down | KeyCode::Right => Ok(self.select(self.selected + 1)),
            KeyCode::Char('p') => Ok(self.select(0)),
            KeyCode::Char('c') => Ok(self.select(1)),
            KeyCode::Enter => Ok(ScreenAction::CompleteOnboarding),
            _ => Ok(ScreenAction::None),
        }
    }

    fn hints(&self, _ctx: &ScreenContext) -> Vec<(&'static str, &'static str)> {
        vec![("Role", "p/c"), ("Finish", "Enter")]
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<()> {
        if ctx.controller.state().user_role == Some(UserRole::Captain) {
            self.selected = 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::router::NavigationController;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_role_keys() {
        let config = Config::default();
        let controller = NavigationController::new("/");
        let ctx = ScreenContext::new(&config, &controller);
        let mut screen = OnboardingScreen::new();

        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('c')), &ctx).unwrap(),
            ScreenAction::SelectRole(UserRole::Captain)
        );
        assert_eq!(
            screen.handle_key(key(KeyCode::Down), &ctx).unwrap(),
            ScreenAction::SelectRole(UserRole::Player)
        );
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter), &ctx).unwrap(),
            ScreenAction::CompleteOnboarding
        );
    }
}
