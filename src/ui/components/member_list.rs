//! Member selector showing each balance

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::ledger::{format_money, Member};

pub struct MemberList<'a> {
    members: &'a [Member],
    selected: Option<&'a str>,
    currency: &'a str,
}

impl<'a> MemberList<'a> {
    pub fn new(members: &'a [Member], selected: Option<&'a str>, currency: &'a str) -> Self {
        Self {
            members,
            selected,
            currency,
        }
    }

    fn row(&self, member: &Member, width: usize) -> ListItem<'static> {
        let balance = format_money(self.currency, member.savings);
        // Right-align the balance; names may contain wide characters
        let used = member.name.width() + balance.width();
        let gap = width.saturating_sub(used).max(1);
        ListItem::new(Line::from(vec![
            Span::raw(member.name.clone()),
            Span::raw(" ".repeat(gap)),
            Span::styled(balance, Style::default().fg(Color::Green)),
        ]))
    }
}

impl Widget for MemberList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Members ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        if self.members.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Line::styled("No members yet", Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        // Inner width minus borders and the highlight symbol
        let row_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .members
            .iter()
            .map(|m| self.row(m, row_width))
            .collect();

        let mut state = ListState::default();
        state.select(
            self.selected
                .and_then(|name| self.members.iter().position(|m| m.name == name)),
        );

        let list = List::new(items)
            .block(block)
            .highlight_symbol("> ")
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
