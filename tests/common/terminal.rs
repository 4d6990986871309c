//! TUI testing utilities using Ratatui's TestBackend
//!
//! Provides helpers for rendering the app to a test buffer
//! and converting the output to strings for assertions.

use kitty::App;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Create a test terminal with standard dimensions (80x24)
pub fn create_test_terminal() -> Terminal<TestBackend> {
    create_test_terminal_sized(80, 24)
}

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Draw one frame of `app` into a fresh 80x24 terminal
pub fn render_app(app: &App) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal();
    terminal
        .draw(|f| app.draw(f))
        .expect("Failed to draw app");
    terminal
}

/// Convert a buffer to a string, one line per row
///
/// Preserves exact spacing and newlines for accurate comparison.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut output = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        output.push('\n');
    }

    output
}

/// Text of row `y` with surrounding whitespace removed
pub fn buffer_row(buffer: &Buffer, y: u16) -> String {
    buffer_to_string(buffer)
        .lines()
        .nth(y as usize)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Check if the buffer contains a string anywhere
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    buffer_to_string(buffer).contains(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_create_terminal_sized() {
        let terminal = create_test_terminal_sized(100, 50);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, 100);
        assert_eq!(size.height, 50);
    }

    #[test]
    fn test_buffer_row_and_contains() {
        let mut terminal = create_test_terminal_sized(20, 3);
        terminal
            .draw(|f| {
                let para = Paragraph::new("  first\nsecond");
                f.render_widget(para, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer_row(buffer, 0), "first");
        assert_eq!(buffer_row(buffer, 1), "second");
        assert_eq!(buffer_row(buffer, 2), "");
        assert!(buffer_contains(buffer, "second"));
        assert!(!buffer_contains(buffer, "missing"));
    }
}
