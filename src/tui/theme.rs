// Theme system for the TUI
//
// Each theme defines colors for every element of the form.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    /// Indigo accents on the terminal background
    #[default]
    Indigo,
    /// The terminal's own 16-color palette
    Terminal,
}

impl ThemeKind {
    /// Look up a theme by config name, falling back to the default
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "terminal" => Self::Terminal,
            "indigo" => Self::Indigo,
            other => {
                tracing::warn!("Unknown theme {:?}, using indigo", other);
                Self::Indigo
            }
        }
    }

    /// Get the theme configuration
    pub fn theme(&self) -> Theme {
        match self {
            Self::Indigo => Theme::indigo(),
            Self::Terminal => Theme::terminal(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,
    /// Focus ring, button fill, link color
    pub accent: Color,
    /// Text drawn on top of `accent`
    pub on_accent: Color,
    /// Fill of a disabled button
    pub disabled: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn indigo() -> Self {
        Self {
            fg: Color::Reset,
            muted: Color::Rgb(107, 114, 128),
            border: Color::Rgb(156, 163, 175),
            border_type: BorderType::Rounded,
            accent: Color::Rgb(99, 102, 241),
            on_accent: Color::White,
            disabled: Color::Rgb(156, 163, 175),
            error: Color::Rgb(239, 68, 68),
            success: Color::Rgb(34, 197, 94),
        }
    }

    pub fn terminal() -> Self {
        Self {
            fg: Color::Reset,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_type: BorderType::Plain,
            accent: Color::Blue,
            on_accent: Color::White,
            disabled: Color::DarkGray,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Border style for a block, highlighted when focused
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style of a clickable button
    pub fn button_style(&self, enabled: bool, focused: bool) -> Style {
        let base = if enabled {
            Style::default().fg(self.on_accent).bg(self.accent)
        } else {
            Style::default().fg(self.on_accent).bg(self.disabled)
        };
        if focused && enabled {
            base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            base.add_modifier(Modifier::BOLD)
        }
    }

    /// Hyperlink text
    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    }
}
