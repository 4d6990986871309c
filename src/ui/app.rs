use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::ledger::{format_money, Ledger, LedgerError};
use crate::ui::components::{
    ConfirmationContext, ConfirmationDialog, ConfirmationDialogState, HistoryView, KeyHints,
    MemberList, TextInputState,
};
use crate::ui::events::{InputMode, StatusKind, StatusMessage};
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};

/// Main application state
pub struct App {
    /// The ledger being edited
    ledger: Ledger,
    /// Application configuration
    config: Config,
    /// Whether the app should quit
    should_quit: bool,
    /// Current input mode
    input_mode: InputMode,
    /// Amount or name being typed
    input: TextInputState,
    /// Pending reset/remove confirmation
    confirmation: ConfirmationDialogState,
    /// Feedback from the last action
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(ledger: Ledger, config: Config) -> Self {
        Self {
            ledger,
            config,
            should_quit: false,
            input_mode: InputMode::Normal,
            input: TextInputState::new(),
            confirmation: ConfirmationDialogState::new(),
            status: None,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the application main loop
    pub fn run(&mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        let mut guard = TerminalGuard::new();
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        guard.cleanup()?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    /// Dispatch a key press according to the current mode
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::EnteringAmount | InputMode::EnteringName => self.handle_input_key(key),
            InputMode::Confirming => self.handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('d') | KeyCode::Enter => {
                if self.ledger.selected().is_some() {
                    self.start_input(InputMode::EnteringAmount);
                } else {
                    self.status = Some(StatusMessage::error("Add a member first"));
                }
            }
            KeyCode::Char('a') => self.start_input(InputMode::EnteringName),
            KeyCode::Char('r') => {
                if !self.ledger.is_empty() {
                    self.confirmation.show(
                        "Reset all",
                        "Set every balance to 0? History is kept.",
                        ConfirmationContext::ResetAll,
                    );
                    self.input_mode = InputMode::Confirming;
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(name) = self.ledger.selected().map(str::to_string) {
                    self.confirmation.show(
                        "Remove member",
                        format!("Remove {name} and their history?"),
                        ConfirmationContext::RemoveMember(name),
                    );
                    self.input_mode = InputMode::Confirming;
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => self.input.delete_char(),
            KeyCode::Delete => self.input.delete_forward(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_start(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(c) => self.input.insert_char(c),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') => self.finish_confirmation(true),
            KeyCode::Char('n') | KeyCode::Esc => self.finish_confirmation(false),
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => self.confirmation.toggle_selection(),
            KeyCode::Enter => {
                let confirmed = self.confirmation.is_confirm_selected();
                self.finish_confirmation(confirmed);
            }
            _ => {}
        }
    }

    fn start_input(&mut self, mode: InputMode) {
        self.input.clear();
        self.input_mode = mode;
    }

    fn move_selection(&mut self, delta: isize) {
        let members = self.ledger.members();
        if members.is_empty() {
            return;
        }
        let current = self
            .ledger
            .selected()
            .and_then(|name| members.iter().position(|m| m.name == name))
            .unwrap_or(0);
        let last = members.len() as isize - 1;
        let next = (current as isize + delta).clamp(0, last) as usize;
        let name = members[next].name.clone();

        if let Err(e) = self.ledger.select(&name) {
            self.report_error(e);
        }
    }

    fn submit_input(&mut self) {
        let raw = self.input.value().to_string();
        let result = match self.input_mode {
            InputMode::EnteringAmount => self.ledger.deposit_selected(&raw).map(|balance| {
                let name = self.ledger.selected().unwrap_or_default();
                format!(
                    "{name} now has {}",
                    format_money(&self.config.currency, balance)
                )
            }),
            InputMode::EnteringName => self.ledger.add_member(&raw).and_then(|name| {
                // First member of an empty ledger
                if self.ledger.selected().is_none() {
                    self.ledger.select(&name)?;
                }
                Ok(format!("Added {name}"))
            }),
            _ => return,
        };

        match result {
            Ok(message) => {
                self.status = Some(StatusMessage::info(message));
                self.input.clear();
                self.input_mode = InputMode::Normal;
            }
            // Stay in the input so the value can be corrected
            Err(e) => self.report_error(e),
        }
    }

    fn finish_confirmation(&mut self, confirmed: bool) {
        let context = self.confirmation.hide();
        self.input_mode = InputMode::Normal;
        if !confirmed {
            return;
        }

        let result = match context {
            Some(ConfirmationContext::ResetAll) => self
                .ledger
                .reset_all()
                .map(|()| "All balances reset".to_string()),
            Some(ConfirmationContext::RemoveMember(name)) => self
                .ledger
                .remove_member(&name)
                .map(|member| format!("Removed {}", member.name)),
            None => return,
        };

        match result {
            Ok(message) => self.status = Some(StatusMessage::info(message)),
            Err(e) => self.report_error(e),
        }
    }

    fn report_error(&mut self, error: LedgerError) {
        if !error.is_user_error() {
            tracing::error!(error = %error, "Ledger operation failed");
        }
        self.status = Some(StatusMessage::error(error.to_string()));
    }

    /// Render the whole screen
    pub fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let [header, body, input, status, total, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        f.render_widget(
            Paragraph::new(Line::styled(
                " Kitty - group savings",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            header,
        );

        let [members_area, history_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(body);
        let currency = self.config.currency.as_str();
        let selected = self.ledger.selected();
        f.render_widget(
            MemberList::new(self.ledger.members(), selected, currency),
            members_area,
        );
        f.render_widget(
            HistoryView::new(selected.and_then(|name| self.ledger.member(name)), currency),
            history_area,
        );

        self.draw_input(f, input);

        if let Some(message) = &self.status {
            let color = match message.kind {
                StatusKind::Info => Color::Green,
                StatusKind::Error => Color::Red,
            };
            f.render_widget(
                Paragraph::new(Line::styled(
                    format!(" {}", message.text),
                    Style::default().fg(color),
                )),
                status,
            );
        }

        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(" Group total: "),
                Span::styled(
                    format_money(currency, self.ledger.total_savings()),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ])),
            total,
        );

        f.render_widget(KeyHints::for_mode(self.input_mode), footer);

        if self.confirmation.visible {
            f.render_widget(ConfirmationDialog::new(&self.confirmation), area);
        }
    }

    fn draw_input(&self, f: &mut Frame, area: Rect) {
        let title = match self.input_mode {
            InputMode::EnteringAmount => format!(
                " Amount for {} ",
                self.ledger.selected().unwrap_or_default()
            ),
            InputMode::EnteringName => " New member name ".to_string(),
            _ => " Input ".to_string(),
        };
        let editing = matches!(
            self.input_mode,
            InputMode::EnteringAmount | InputMode::EnteringName
        );
        let border = if editing { Color::Cyan } else { Color::DarkGray };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        f.render_widget(Paragraph::new(self.input.value()).block(block), area);

        if editing {
            let before_cursor: String = self.input.value().chars().take(self.input.cursor()).collect();
            let x = inner.x + (before_cursor.width() as u16).min(inner.width.saturating_sub(1));
            f.set_cursor_position((x, inner.y));
        }
    }
}
