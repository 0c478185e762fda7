// Screen layout
//
// Stacks the components top to bottom. The form card is centered and
// capped in width on wide terminals; the logs panel only takes space
// while it is toggled on.

use super::app::App;
use super::components::{footer, logs_panel, result_panel, status_bar, title_bar, url_form};
use super::layout::form_column;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Rows of the logs panel when shown
const LOGS_HEIGHT: u16 = 8;

/// Draw the whole screen
pub fn draw(f: &mut Frame, app: &App) {
    let logs_height = if app.show_logs { LOGS_HEIGHT } else { 0 };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Title
            Constraint::Min(0),              // Form card
            Constraint::Length(logs_height), // Logs (F2)
            Constraint::Length(2),           // Status bar
        ])
        .split(f.area());

    title_bar::render(f, rows[0], app);
    draw_form(f, form_column(rows[1]), app);
    if app.show_logs {
        logs_panel::render(f, rows[2], app);
    }
    status_bar::render(f, rows[3], app);
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let result_height = if app.has_result() {
        result_panel::HEIGHT
    } else {
        0
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacing
            Constraint::Length(url_form::HEIGHT),
            Constraint::Length(result_height),
            Constraint::Min(0),
            Constraint::Length(1), // Footer
        ])
        .split(area);

    url_form::render(f, rows[1], app);
    if app.has_result() {
        result_panel::render(f, rows[2], app);
    }
    footer::render(f, rows[4], app);
}
