// Result panel component
//
// Shown only while a short URL is displayed: the link and the copy button.

use crate::tui::app::{App, Focus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows this component needs
pub const HEIGHT: u16 = 5;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(short_url) = app.form.state().short_url.as_deref() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style(app.focus == Focus::Copy))
        .title(" Your shortened URL: ")
        .title_style(
            Style::default()
                .fg(app.theme.fg)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let label = app.form.copy_status().label();
    let button_width = label.chars().count() as u16 + 4;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(button_width)])
        .split(inner);

    let link = Paragraph::new(short_url)
        .style(app.theme.link_style())
        .wrap(Wrap { trim: true });
    f.render_widget(link, cols[0]);

    let button_style = app.theme.button_style(true, app.focus == Focus::Copy);
    let button_row = Rect::new(cols[1].x, cols[1].y, cols[1].width, 1);
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(button_style);
    f.render_widget(button, button_row);
}
