//! The [`CourtsideLogo`] widget renders the wordmark on the welcome screen.
use crate::styles::theme;
use indoc::indoc;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Widget};

const WORDMARK: &str = indoc! {"
    ┏━╸┏━┓╻ ╻┏━┓╺┳╸┏━┓╻╺┳┓┏━╸
    ┃  ┃ ┃┃ ┃┣┳┛ ┃ ┗━┓┃ ┃┃┣╸
    ┗━╸┗━┛┗━┛╹┗╸ ╹ ┗━┛╹╺┻┛┗━╸
"};

/// Three-line box drawing wordmark
///
/// ```text
/// ┏━╸┏━┓╻ ╻┏━┓╺┳╸┏━┓╻╺┳┓┏━╸
/// ┃  ┃ ┃┃ ┃┣┳┛ ┃ ┗━┓┃ ┃┃┣╸
/// ┗━╸┗━┛┗━┛╹┗╸ ╹ ┗━┛╹╺┻┛┗━╸
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CourtsideLogo;

impl CourtsideLogo {
    pub fn height() -> u16 {
        WORDMARK.lines().count() as u16
    }

    pub fn width() -> u16 {
        WORDMARK
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as u16
    }
}

impl Widget for CourtsideLogo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Text::raw(WORDMARK))
            .style(theme().title_style())
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert_eq!(CourtsideLogo::height(), 3);
        assert_eq!(CourtsideLogo::width(), 25);
    }
}
