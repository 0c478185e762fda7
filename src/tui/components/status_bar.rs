// Status bar component
//
// Key hints for the focused widget, plus the version.

use crate::config::VERSION;
use crate::tui::app::{App, Focus};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Normal and up: full hints with labels
/// - Compact: keys only
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);

    let action = match app.focus {
        Focus::Input | Focus::Submit => "Enter: shorten",
        Focus::Copy => "Enter: copy",
    };

    let text = if bp.at_least(Breakpoint::Normal) {
        let copy_hint = if app.has_result() { " │ Ctrl+Y: copy" } else { "" };
        format!(
            " {} │ Tab: next{} │ F2: logs │ Esc: quit │ v{}",
            action, copy_hint, VERSION
        )
    } else {
        " ⏎ Tab ^Y F2 Esc".to_string()
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(app.theme.muted))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
