//! Loading, OAuth callback and debug screens.

use super::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::router::SessionPhase;
use crate::styles::theme;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Shown while auth and the onboarding lookup resolve.
#[derive(Debug, Default)]
pub struct LoadingScreen {
    frame: usize,
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn status(ctx: &ScreenContext) -> &'static str {
        if ctx.controller.is_stalled() {
            return "We couldn't finish loading your account.";
        }
        match ctx.controller.phase() {
            SessionPhase::Idle => "Checking your session…",
            SessionPhase::Syncing => "Syncing your account…",
            SessionPhase::FetchingStatus => "Loading your league profile…",
            SessionPhase::Ready | SessionPhase::Failed => "Almost there…",
        }
    }
}

impl Screen for LoadingScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        self.frame = self.frame.wrapping_add(1);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(SPINNER[self.frame % SPINNER.len()], t.title_style()),
                Span::raw("  "),
                Span::styled(Self::status(ctx), t.text_style()),
            ]),
        ];
        if ctx.controller.is_stalled() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press r to try again.",
                t.key_style(),
            )));
        }

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> Result<ScreenAction> {
        match key.code {
            KeyCode::Char('r') if ctx.controller.is_stalled() => Ok(ScreenAction::Retry),
            _ => Ok(ScreenAction::None),
        }
    }

    fn hints(&self, ctx: &ScreenContext) -> Vec<(&'static str, &'static str)> {
        if ctx.controller.is_stalled() {
            vec![("Retry", "r")]
        } else {
            Vec::new()
        }
    }
}

/// Landing screen for `/auth/callback`.
#[derive(Debug, Default)]
pub struct OauthCallbackScreen;

impl Screen for OauthCallbackScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Completing sign-in…", t.title_style())),
            Line::from(""),
            Line::from(Span::styled(
                "The identity provider hands the session back here.",
                t.muted_style(),
            )),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext) -> Result<ScreenAction> {
        match key.code {
            KeyCode::Char('c') | KeyCode::Enter => Ok(ScreenAction::SetLocation("/".to_string())),
            _ => Ok(ScreenAction::None),
        }
    }

    fn hints(&self, _ctx: &ScreenContext) -> Vec<(&'static str, &'static str)> {
        vec![("Continue", "c")]
    }
}

/// State dump for `/debug`.
#[derive(Debug, Default)]
pub struct DebugScreen;

impl DebugScreen {
    fn dump(ctx: &ScreenContext) -> Result<String> {
        let state = serde_json::to_string_pretty(ctx.controller.state())
            .context("Failed to serialize navigation state")?;
        let signals = serde_json::to_string_pretty(ctx.controller.signals())
            .context("Failed to serialize auth signals")?;
        Ok(format!(
            "location: {}\ngeneration: {}\nphase: {:?}\napi: {}\n\nnavigation {}\n\nauth {}",
            ctx.controller.location(),
            ctx.controller.generation(),
            ctx.controller.phase(),
            ctx.config.api_base_url,
            state,
            signals
        ))
    }
}

impl Screen for DebugScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style())
            .title(" Router state ");
        frame.render_widget(
            Paragraph::new(Self::dump(ctx)?)
                .style(t.text_style())
                .wrap(Wrap { trim: false })
                .block(block),
            area,
        );
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext) -> Result<ScreenAction> {
        match key.code {
            KeyCode::Char('c') => Ok(ScreenAction::SetLocation("/".to_string())),
            _ => Ok(ScreenAction::None),
        }
    }

    fn hints(&self, _ctx: &ScreenContext) -> Vec<(&'static str, &'static str)> {
        vec![("Continue", "c")]
    }
}
