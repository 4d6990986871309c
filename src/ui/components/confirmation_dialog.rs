//! Yes/no confirmation dialog for destructive ledger actions

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::dialog::DialogFrame;

/// What the dialog is asking to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationContext {
    /// Zero every member's balance
    ResetAll,
    /// Delete a member and their history
    RemoveMember(String),
}

/// State for the confirmation dialog
#[derive(Debug, Clone, Default)]
pub struct ConfirmationDialogState {
    pub visible: bool,
    pub title: String,
    pub message: String,
    /// Currently selected button (0 = Cancel, 1 = Confirm)
    pub selected: usize,
    pub context: Option<ConfirmationContext>,
}

impl ConfirmationDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        context: ConfirmationContext,
    ) {
        self.visible = true;
        self.title = title.into();
        self.message = message.into();
        self.selected = 0; // Default to Cancel
        self.context = Some(context);
    }

    /// Hide the dialog, returning what it was confirming
    pub fn hide(&mut self) -> Option<ConfirmationContext> {
        self.visible = false;
        self.context.take()
    }

    pub fn toggle_selection(&mut self) {
        self.selected = if self.selected == 0 { 1 } else { 0 };
    }

    pub fn is_confirm_selected(&self) -> bool {
        self.selected == 1
    }
}

/// Confirmation dialog widget
pub struct ConfirmationDialog<'a> {
    state: &'a ConfirmationDialogState,
}

impl<'a> ConfirmationDialog<'a> {
    pub fn new(state: &'a ConfirmationDialogState) -> Self {
        Self { state }
    }

    fn button(label: &str, selected: bool, color: Color) -> Span<'static> {
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        Span::styled(format!(" {label} "), style)
    }
}

impl Widget for ConfirmationDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.state.visible {
            return;
        }

        let inner = DialogFrame::new(&self.state.title, 48, 8)
            .border_color(Color::Red)
            .render(area, buf);
        if inner.height < 3 {
            return;
        }

        let message_area = Rect {
            height: inner.height - 2,
            ..inner
        };
        Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(message_area, buf);

        let buttons = Line::from(vec![
            Self::button("Cancel", !self.state.is_confirm_selected(), Color::Gray),
            Span::raw("   "),
            Self::button("Confirm", self.state.is_confirm_selected(), Color::Red),
        ]);
        let buttons_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(buttons_area, buf);
    }
}
