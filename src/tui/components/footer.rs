// Footer component
//
// Static links to the project and its author.

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");
const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            format!("Created by {}", AUTHORS.replace(':', ", ")),
            Style::default().fg(app.theme.muted),
        ),
        Span::raw("  "),
        Span::styled(HOMEPAGE, app.theme.link_style()),
        Span::raw("  "),
        Span::styled(REPOSITORY, app.theme.link_style()),
    ]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
