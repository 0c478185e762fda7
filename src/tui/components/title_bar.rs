// Title bar component
//
// Renders the app title, with a spinner while a request is in flight.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let busy = if app.form.state().is_loading {
        format!(" {}", app.spinner_char())
    } else {
        String::new()
    };

    let title = Paragraph::new(format!(" 🔗 Shorten My URL{}", busy))
        .style(
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.accent))
                .title_top(Line::from(" F2: logs ").right_aligned()),
        );

    f.render_widget(title, area);
}
