//! Sign-in and sign-up forms.

use super::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::router::{registry, Screen as ScreenId};
use crate::styles::theme;
use crate::widgets::{TextInput, TextInputWidget};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    DisplayName,
}

pub struct AuthFormScreen {
    mode: AuthMode,
    email: TextInput,
    display_name: TextInput,
    focus: Field,
}

impl AuthFormScreen {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: TextInput::new(),
            display_name: TextInput::new(),
            focus: Field::Email,
        }
    }

    fn screen(&self) -> ScreenId {
        match self.mode {
            AuthMode::SignIn => ScreenId::SignIn,
            AuthMode::SignUp => ScreenId::SignUp,
        }
    }

    fn toggle_focus(&mut self) {
        if self.mode == AuthMode::SignUp {
            self.focus = match self.focus {
                Field::Email => Field::DisplayName,
                Field::DisplayName => Field::Email,
            };
        }
    }

    fn submit(&self) -> ScreenAction {
        if self.email.is_empty() {
            return ScreenAction::None;
        }
        let email = self.email.text().trim().to_string();
        match self.mode {
            AuthMode::SignIn => ScreenAction::SignIn { email },
            AuthMode::SignUp => ScreenAction::SignUp {
                email,
                display_name: self.display_name.text().trim().to_string(),
            },
        }
    }
}

impl Screen for AuthFormScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let mut constraints = vec![Constraint::Length(3)];
        if self.mode == AuthMode::SignUp {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(0));

        let form = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(area);

        TextInputWidget::new(&self.email, "Email")
            .placeholder("you@example.com")
            .focused(self.focus == Field::Email)
            .render_with_cursor(frame, form[0]);

        if self.mode == AuthMode::SignUp {
            TextInputWidget::new(&self.display_name, "Display name")
                .placeholder("How teammates see you")
                .focused(self.focus == Field::DisplayName)
                .render_with_cursor(frame, form[1]);
        }

        let switch = registry::spec(self.screen())
            .affordances
            .first()
            .map(|a| format!("{} Ctrl+{}", a.label, a.key))
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(switch).style(t.muted_style()),
            form[form.len() - 1],
        );
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char(c) = key.code {
                let spec = registry::spec(self.screen());
                if let Some(a) = spec.affordances.iter().find(|a| a.key == c) {
                    return Ok(ScreenAction::navigate(a.target));
                }
            }
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Esc => Ok(ScreenAction::Back),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                Ok(ScreenAction::None)
            }
            KeyCode::Enter => Ok(self.submit()),
            code => {
                match self.focus {
                    Field::Email => self.email.handle_key(code),
                    Field::DisplayName => self.display_name.handle_key(code),
                };
                Ok(ScreenAction::None)
            }
        }
    }

    fn hints(&self, _ctx: &ScreenContext) -> Vec<(&'static str, &'static str)> {
        let mut hints = vec![("Submit", "Enter")];
        if self.mode == AuthMode::SignUp {
            hints.push(("Next field", "Tab"));
        }
        hints.push(("Back", "Esc"));
        hints
    }

    fn is_input_focused(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::router::NavigationController;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut AuthFormScreen, ctx: &ScreenContext, text: &str) {
        for c in text.chars() {
            screen.handle_key(press(KeyCode::Char(c)), ctx).unwrap();
        }
    }

    #[test]
    fn test_sign_up_collects_both_fields() {
        let config = Config::default();
        let controller = NavigationController::new("/");
        let ctx = ScreenContext::new(&config, &controller);

        let mut form = AuthFormScreen::new(AuthMode::SignUp);
        type_text(&mut form, &ctx, "sam@example.com");
        form.handle_key(press(KeyCode::Tab), &ctx).unwrap();
        type_text(&mut form, &ctx, "Sam");

        assert_eq!(
            form.handle_key(press(KeyCode::Enter), &ctx).unwrap(),
            ScreenAction::SignUp {
                email: "sam@example.com".to_string(),
                display_name: "Sam".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_email_not_submitted() {
        let config = Config::default();
        let controller = NavigationController::new("/");
        let ctx = ScreenContext::new(&config, &controller);

        let mut form = AuthFormScreen::new(AuthMode::SignIn);
        assert_eq!(form.handle_key(press(KeyCode::Enter), &ctx).unwrap(), ScreenAction::None);
    }

    #[test]
    fn test_ctrl_shortcut_switches_form() {
        let config = Config::default();
        let controller = NavigationController::new("/");
        let ctx = ScreenContext::new(&config, &controller);

        let mut form = AuthFormScreen::new(AuthMode::SignIn);
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(
            form.handle_key(key, &ctx).unwrap(),
            ScreenAction::navigate(ScreenId::SignUp)
        );
        // Plain 'u' is text
        form.handle_key(press(KeyCode::Char('u')), &ctx).unwrap();
        assert_eq!(form.email.text(), "u");
    }
}
