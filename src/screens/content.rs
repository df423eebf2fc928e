//! Registry-driven content view.
//!
//! Welcome, the tab roots and every detail screen share one view: the
//! current selections, a list of demo entries to pick from, and the
//! affordances the registry declares for the screen.

use super::sample;
use super::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::router::{registry, Affordance, NavContext, Screen as ScreenId, SelectionKind};
use crate::styles::theme;
use crate::widgets::CourtsideLogo;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub struct ContentScreen {
    screen: ScreenId,
    list_state: ListState,
}

impl ContentScreen {
    pub fn new(screen: ScreenId) -> Self {
        let mut list_state = ListState::default();
        if Self::list_kind_of(screen).is_some() {
            list_state.select(Some(0));
        }
        Self { screen, list_state }
    }

    /// The selection kind this screen lists, if any.
    fn list_kind_of(screen: ScreenId) -> Option<SelectionKind> {
        registry::spec(screen)
            .affordances
            .iter()
            .find_map(|a| a.selects)
    }

    fn list_kind(&self) -> Option<SelectionKind> {
        Self::list_kind_of(self.screen)
    }

    /// Id used when an affordance records a selection of `kind`.
    fn selected_id(&self, kind: SelectionKind) -> Option<&'static str> {
        let entries = sample::entries(kind);
        let index = if self.list_kind() == Some(kind) {
            self.list_state.selected().unwrap_or(0)
        } else {
            0
        };
        entries.get(index).or_else(|| entries.first()).map(|(id, _)| *id)
    }

    fn follow(&self, affordance: &Affordance) -> ScreenAction {
        let context = affordance
            .selects
            .and_then(|kind| self.selected_id(kind).map(|id| NavContext::with(kind, id)));
        ScreenAction::Navigate {
            screen: affordance.target,
            tab: registry::spec(affordance.target).tab(),
            context,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(kind) = self.list_kind() else {
            return;
        };
        let len = sample::entries(kind).len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(len as isize) as usize;
        self.list_state.select(Some(next));
    }

    fn selection_lines(ctx: &RenderContext) -> Vec<Line<'static>> {
        let t = theme();
        let context = ctx.nav_context();
        [
            (SelectionKind::Division, "Division"),
            (SelectionKind::Team, "Team"),
            (SelectionKind::Match, "Match"),
        ]
        .into_iter()
        .filter_map(|(kind, name)| {
            let id = context.get(kind)?;
            let label = sample::label(kind, id).unwrap_or(id).to_string();
            Some(Line::from(vec![
                Span::styled(format!("{}: ", name), t.muted_style()),
                Span::styled(label, t.text_style()),
            ]))
        })
        .collect()
    }
}

impl Screen for ContentScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let spec = registry::spec(self.screen);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let selections = Self::selection_lines(ctx);
        let logo_height = if self.screen == ScreenId::Welcome {
            CourtsideLogo::height() + 1
        } else {
            0
        };
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(logo_height),
                Constraint::Length(selections.len() as u16 + u16::from(!selections.is_empty()) * 2),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        if logo_height > 0 {
            frame.render_widget(CourtsideLogo, left[0]);
        }

        if !selections.is_empty() {
            frame.render_widget(
                Paragraph::new(selections).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(t.border_style())
                        .title(" Selected "),
                ),
                left[1],
            );
        }

        if let Some(kind) = self.list_kind() {
            let items: Vec<ListItem> = sample::entries(kind)
                .iter()
                .map(|(_, label)| ListItem::new(*label))
                .collect();
            let title = match kind {
                SelectionKind::Team => " Teams ",
                SelectionKind::Match => " Matches ",
                SelectionKind::Division => " Divisions ",
            };
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(t.border_focused_style())
                        .title(title),
                )
                .style(t.text_style())
                .highlight_style(t.highlight_style())
                .highlight_symbol("» ");
            frame.render_stateful_widget(list, left[2], &mut self.list_state);
        }

        let actions: Vec<Line> = spec
            .visible_affordances(ctx.is_captain())
            .map(|a| {
                let label_style = if a.captain_only {
                    t.captain_style()
                } else {
                    t.text_style()
                };
                Line::from(vec![
                    Span::styled(format!("[{}] ", a.key), t.key_style()),
                    Span::styled(a.label, label_style),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(actions).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(t.border_style())
                    .title(" Go to "),
            ),
            columns[1],
        );
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> Result<ScreenAction> {
        let spec = registry::spec(self.screen);
        match key.code {
            KeyCode::Up => {
                self.move_selection(-1);
                Ok(ScreenAction::None)
            }
            KeyCode::Down => {
                self.move_selection(1);
                Ok(ScreenAction::None)
            }
            KeyCode::Enter => {
                let kind = self.list_kind();
                Ok(spec
                    .visible_affordances(ctx.is_captain())
                    .find(|a| a.selects.is_some() && a.selects == kind)
                    .map_or(ScreenAction::None, |a| self.follow(a)))
            }
            KeyCode::Char('x') if self.screen == ScreenId::Settings => Ok(ScreenAction::SignOut),
            KeyCode::Char(c) => Ok(spec
                .visible_affordances(ctx.is_captain())
                .find(|a| a.key == c)
                .map_or(ScreenAction::None, |a| self.follow(a))),
            _ => Ok(ScreenAction::None),
        }
    }

    fn hints(&self, _ctx: &ScreenContext) -> Vec<(&'static str, &'static str)> {
        let mut hints = Vec::new();
        if self.list_kind().is_some() {
            hints.push(("Move", "↑↓"));
            hints.push(("Open", "Enter"));
        }
        if self.screen == ScreenId::Settings {
            hints.push(("Sign out", "x"));
        }
        hints
    }
}
