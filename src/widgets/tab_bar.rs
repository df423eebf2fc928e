use crate::router::TabId;
use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Tabs};

/// Bottom tab bar of the tabbed shell.
pub struct TabBar {
    active: TabId,
}

impl TabBar {
    pub fn new(active: TabId) -> Self {
        Self { active }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let titles = TabId::ALL
            .iter()
            .map(|tab| format!("{} {}", tab.index() + 1, tab.label()));

        Tabs::new(titles)
            .select(self.active.index())
            .style(t.muted_style())
            .highlight_style(t.highlight_style())
            .divider("│")
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(t.border_style()),
            )
            .render(area, buf);
    }
}
