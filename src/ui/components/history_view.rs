//! Transaction history of one member

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ledger::{describe_transaction, Member, Transaction};

pub struct HistoryView<'a> {
    member: Option<&'a Member>,
    currency: &'a str,
}

impl<'a> HistoryView<'a> {
    pub fn new(member: Option<&'a Member>, currency: &'a str) -> Self {
        Self { member, currency }
    }
}

impl Widget for HistoryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.member {
            Some(member) => format!(" History: {} ", member.name),
            None => " History ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let transactions = self.member.map(|m| m.transactions.as_slice()).unwrap_or(&[]);
        if transactions.is_empty() {
            Line::styled("No transactions", Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        // Newest entries stay visible when the history outgrows the panel
        let skip = transactions.len().saturating_sub(inner.height as usize);
        let lines: Vec<Line> = transactions[skip..]
            .iter()
            .map(|tx| {
                let color = match tx {
                    Transaction::Deposit { .. } => Color::Green,
                    Transaction::Reset { .. } => Color::Yellow,
                };
                Line::styled(describe_transaction(self.currency, tx), Style::default().fg(color))
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
