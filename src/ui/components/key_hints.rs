//! Footer listing the keys available in the current mode

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::events::InputMode;

pub struct KeyHints {
    hints: &'static [(&'static str, &'static str)],
}

impl KeyHints {
    pub fn for_mode(mode: InputMode) -> Self {
        let hints: &'static [(&'static str, &'static str)] = match mode {
            InputMode::Normal => &[
                ("↑↓", "select"),
                ("d", "deposit"),
                ("a", "add member"),
                ("x", "remove"),
                ("r", "reset all"),
                ("q", "quit"),
            ],
            InputMode::EnteringAmount | InputMode::EnteringName => {
                &[("Enter", "submit"), ("Esc", "cancel")]
            }
            InputMode::Confirming => &[
                ("y", "confirm"),
                ("n", "cancel"),
                ("Tab", "switch"),
                ("Enter", "choose"),
            ],
        };
        Self { hints }
    }
}

impl Widget for KeyHints {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*action, Style::default().fg(Color::DarkGray)));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
