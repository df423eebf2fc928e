use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Key hint footer.
pub struct Footer;

impl Footer {
    /// Render `(label, keys)` hints separated by `|`.
    pub fn render(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
        let t = theme();
        let mut spans = Vec::new();

        for (i, (label, keys)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }
            spans.push(Span::styled(format!("{}: ", label), t.title_style()));
            spans.push(Span::styled(*keys, t.key_style()));
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style());

        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}
