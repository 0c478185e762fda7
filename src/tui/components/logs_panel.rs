//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer, color-coded by level.
//! Toggled with F2; diagnostic detail for failed requests lands here.

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(format_entry(entry, &app.theme)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border))
            .title(" Logs "),
    );

    f.render_widget(list, area);
}

fn level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.error),
        LogLevel::Info => Style::default().fg(theme.success),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

fn format_entry(entry: &LogEntry, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            entry.timestamp.format("%H:%M:%S ").to_string(),
            Style::default().fg(theme.muted),
        ),
        Span::styled(
            format!("{:<5} ", entry.level.as_str()),
            level_style(entry.level, theme),
        ),
        Span::raw(entry.message.clone()),
    ])
}
