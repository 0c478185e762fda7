// URL form component
//
// Label, URL input, submit button, and the single message line beneath
// them (input hint or request error).

use crate::tui::app::{App, Focus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Placeholder shown in an empty input
const PLACEHOLDER: &str = "https://example.com";

/// Rows this component needs
pub const HEIGHT: u16 = 8;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(3), // Input
            Constraint::Length(3), // Button
            Constraint::Length(1), // Hint or error
        ])
        .split(area);

    let label = Paragraph::new("Enter your long URL").style(Style::default().fg(app.theme.fg));
    f.render_widget(label, rows[0]);

    render_input(f, rows[1], app);
    render_button(f, rows[2], app);
    render_message(f, rows[3], app);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style(focused));
    let inner = block.inner(area);

    let input = app.form.input();
    if input.is_empty() {
        let placeholder = Paragraph::new(PLACEHOLDER)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(placeholder, area);
    } else {
        let (_, scroll) = cursor_column(input, app.form.cursor(), inner.width);
        let text = Paragraph::new(input)
            .style(Style::default().fg(app.theme.fg))
            .scroll((0, scroll))
            .block(block);
        f.render_widget(text, area);
    }

    if focused && inner.width > 0 {
        let (col, _) = cursor_column(input, app.form.cursor(), inner.width);
        f.set_cursor_position((inner.x + col, inner.y));
    }
}

/// Visible cursor column and horizontal scroll for an input `width` cells wide
fn cursor_column(input: &str, cursor: usize, width: u16) -> (u16, u16) {
    let before: String = input.chars().take(cursor).collect();
    let offset = UnicodeWidthStr::width(before.as_str()) as u16;
    let scroll = offset.saturating_sub(width.saturating_sub(1));
    (offset - scroll, scroll)
}

fn render_button(f: &mut Frame, area: Rect, app: &App) {
    let enabled = app.submit_enabled();
    let label = if enabled {
        "Generate Short URL".to_string()
    } else {
        format!("{} Processing...", app.spinner_char())
    };

    let style = app
        .theme
        .button_style(enabled, app.focus == Focus::Submit);
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style);

    // Fill the whole button, label on the middle row
    let label_row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    f.render_widget(Block::default().style(style), area);
    f.render_widget(button, label_row);
}

fn render_message(f: &mut Frame, area: Rect, app: &App) {
    let (text, color) = match (app.input_hint, app.form.state().error_message.as_deref()) {
        (Some(hint), _) => (hint, app.theme.muted),
        (None, Some(error)) => (error, app.theme.error),
        (None, None) => return,
    };

    let message = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color));
    f.render_widget(message, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_column_without_scroll() {
        assert_eq!(cursor_column("https://a.io", 5, 40), (5, 0));
    }

    #[test]
    fn test_cursor_column_scrolls_long_input() {
        let input = "x".repeat(50);
        // 50 cells before the cursor, 20 visible: keep the cursor on the last cell
        assert_eq!(cursor_column(&input, 50, 20), (19, 31));
    }

    #[test]
    fn test_cursor_column_counts_wide_chars() {
        assert_eq!(cursor_column("日本", 2, 40), (4, 0));
    }
}
