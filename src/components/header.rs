use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

/// Screen header: title bar with the description underneath.
pub struct Header;

impl Header {
    /// Render the header.
    ///
    /// `badge` is drawn right-aligned in the title row (signed-in user and
    /// role). When `show_back` is set a back hint is prefixed to the title.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        description: &str,
        badge: Option<&str>,
        show_back: bool,
    ) {
        let t = theme();
        let title = if show_back {
            format!(" \u{2190} {} ", title)
        } else {
            format!(" {} ", title)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(Line::from(title).style(t.title_style()))
            .padding(Padding::new(1, 1, 0, 0));
        if let Some(badge) = badge {
            block = block.title(
                Line::from(format!(" {} ", badge))
                    .style(t.muted_style())
                    .right_aligned(),
            );
        }

        let description = Paragraph::new(description)
            .style(t.text_style())
            .wrap(Wrap { trim: true })
            .block(block);

        frame.render_widget(description, area);
    }
}
