//! Full-screen rendering of the TUI driven by key presses

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kitty::ui::InputMode;
use kitty::{App, Config};

use super::common::fixtures::{memory_ledger, FIXED_TIMESTAMP};
use super::common::terminal::{buffer_contains, buffer_row, render_app};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn test_initial_screen() {
    let app = App::new(memory_ledger(), Config::default());
    let terminal = render_app(&app);
    let buffer = terminal.backend().buffer();

    insta::assert_snapshot!(buffer_row(buffer, 0), @"Kitty - group savings");
    assert!(buffer_contains(buffer, " Members "));
    assert!(buffer_contains(buffer, "> Ali"));
    assert!(buffer_contains(buffer, " History: Ali "));
    assert!(buffer_contains(buffer, "No transactions"));
    insta::assert_snapshot!(buffer_row(buffer, 22), @"Group total: Rp0");
    assert!(buffer_row(buffer, 23).starts_with("↑↓ select"));
}

#[test]
fn test_history_follows_selection() {
    let mut app = App::new(memory_ledger(), Config::default());

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('d'));
    let terminal = render_app(&app);
    assert!(buffer_contains(terminal.backend().buffer(), " Amount for Budi "));
    assert!(buffer_contains(terminal.backend().buffer(), "Enter submit"));

    type_text(&mut app, "1500");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('r'));
    press(&mut app, KeyCode::Char('y'));

    let terminal = render_app(&app);
    let buffer = terminal.backend().buffer();
    assert!(buffer_contains(buffer, " History: Budi "));
    assert!(buffer_contains(
        buffer,
        &format!("+ Deposit: Rp1.500 ({FIXED_TIMESTAMP})")
    ));
    assert!(buffer_contains(buffer, &format!("Reset balance ({FIXED_TIMESTAMP})")));
    assert!(buffer_contains(buffer, "All balances reset"));

    press(&mut app, KeyCode::Up);
    let terminal = render_app(&app);
    assert!(buffer_contains(terminal.backend().buffer(), " History: Ali "));
}

#[test]
fn test_confirmation_dialog_overlay() {
    let mut app = App::new(memory_ledger(), Config::default());
    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.input_mode(), InputMode::Confirming);

    let terminal = render_app(&app);
    let buffer = terminal.backend().buffer();
    assert!(buffer_contains(buffer, "Set every balance to 0? History is kept."));
    assert!(buffer_contains(buffer, "Cancel"));
    assert!(buffer_contains(buffer, "Confirm"));

    press(&mut app, KeyCode::Esc);
    let terminal = render_app(&app);
    assert!(!buffer_contains(terminal.backend().buffer(), "Set every balance"));
    assert_eq!(app.ledger().member("Ali").unwrap().transactions.len(), 0);
}

#[test]
fn test_error_line_for_invalid_name() {
    let mut app = App::new(memory_ledger(), Config::default());
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "   ");
    press(&mut app, KeyCode::Enter);

    let terminal = render_app(&app);
    let buffer = terminal.backend().buffer();
    assert!(buffer_contains(buffer, " New member name "));
    assert!(buffer_contains(buffer, "is already used or invalid"));
}
