//! Toast notifications.
//!
//! One toast at a time, drawn over the bottom-right corner of the content
//! area. Toasts never take focus; they expire on their own.

use crate::router::{Notice, NoticeLevel};
use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: NoticeLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(notice: Notice, duration: Duration) -> Self {
        Self {
            message: notice.message,
            level: notice.level,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    fn icon(&self) -> &'static str {
        match self.level {
            NoticeLevel::Success => "\u{2714}", // ✔
            NoticeLevel::Info => "\u{2139}",    // ℹ
            NoticeLevel::Warning => "\u{26A0}", // ⚠
            NoticeLevel::Error => "\u{2718}",   // ✘
        }
    }

    fn color(&self) -> Color {
        let t = theme();
        match self.level {
            NoticeLevel::Success => t.success,
            NoticeLevel::Info => t.primary,
            NoticeLevel::Warning => t.warning,
            NoticeLevel::Error => t.error,
        }
    }
}

/// Renders a [`Toast`] in the bottom-right corner of the given area.
pub struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    fn placement(&self, area: Rect) -> Rect {
        let width = 48u16.min(area.width.saturating_sub(2));
        // Two lines of text plus borders
        let height = 4u16.min(area.height);
        let x = area.x + area.width.saturating_sub(width + 1);
        let y = area.y + area.height.saturating_sub(height);
        Rect::new(x, y, width, height)
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let placement = self.placement(area);
        let t = theme();

        Widget::render(Clear, placement, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.toast.color()))
            .style(t.background_style());

        Paragraph::new(format!(" {} {}", self.toast.icon(), self.toast.message))
            .block(block)
            .style(t.text_style().add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .render(placement, buf);
    }
}

/// Holds the active toast.
#[derive(Debug)]
pub struct ToastManager {
    current: Option<Toast>,
    duration: Duration,
}

impl ToastManager {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Show a notice, replacing the current toast.
    pub fn notify(&mut self, notice: Notice) {
        self.current = Some(Toast::new(notice, self.duration));
    }

    /// Drop an expired toast; returns whether one is still showing.
    pub fn tick(&mut self) -> bool {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        if let Some(toast) = self.current() {
            frame.render_widget(ToastWidget::new(toast), area);
        }
    }
}
