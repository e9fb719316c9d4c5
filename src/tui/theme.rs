// Color themes for the TUI
//
// Selected by name from config (`theme = "dark"`). Unknown names fall back
// to the dark theme.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    /// Terminal's own palette, no background
    Terminal,
}

impl ThemeKind {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => Self::Light,
            "terminal" | "basic" => Self::Terminal,
            _ => Self::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Terminal => "terminal",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,

    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,

    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    pub selection: Color,
    pub selection_fg: Color,

    pub success: Color,
    pub warn: Color,
    pub error: Color,

    pub header: Color,
    pub shimmer: Color,
    pub panel_logs: Color,

    pub border_type: BorderType,
}

impl Theme {
    pub fn by_name(name: &str) -> Self {
        Self::new(ThemeKind::from_name(name))
    }

    pub fn new(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self {
                kind,
                title: Color::Rgb(130, 200, 255),
                border: Color::Rgb(90, 100, 120),
                highlight: Color::Rgb(255, 200, 90),
                status_bar: Color::Rgb(170, 180, 195),
                background: Color::Rgb(22, 24, 30),
                foreground: Color::Rgb(220, 224, 230),
                muted: Color::Rgb(120, 128, 140),
                selection: Color::Rgb(55, 70, 100),
                selection_fg: Color::Rgb(255, 255, 255),
                success: Color::Rgb(120, 210, 140),
                warn: Color::Rgb(240, 190, 90),
                error: Color::Rgb(240, 110, 110),
                header: Color::Rgb(150, 210, 200),
                shimmer: Color::Rgb(60, 66, 78),
                panel_logs: Color::Rgb(190, 150, 255),
                border_type: BorderType::Rounded,
            },
            ThemeKind::Light => Self {
                kind,
                title: Color::Rgb(20, 90, 170),
                border: Color::Rgb(170, 175, 185),
                highlight: Color::Rgb(200, 120, 0),
                status_bar: Color::Rgb(80, 85, 95),
                background: Color::Rgb(250, 250, 248),
                foreground: Color::Rgb(30, 32, 36),
                muted: Color::Rgb(130, 135, 145),
                selection: Color::Rgb(200, 220, 250),
                selection_fg: Color::Rgb(10, 10, 10),
                success: Color::Rgb(30, 140, 60),
                warn: Color::Rgb(180, 120, 0),
                error: Color::Rgb(200, 40, 40),
                header: Color::Rgb(0, 110, 110),
                shimmer: Color::Rgb(220, 222, 226),
                panel_logs: Color::Rgb(110, 60, 180),
                border_type: BorderType::Plain,
            },
            ThemeKind::Terminal => Self {
                kind,
                title: Color::Cyan,
                border: Color::DarkGray,
                highlight: Color::Yellow,
                status_bar: Color::Gray,
                background: Color::Reset,
                foreground: Color::Reset,
                muted: Color::DarkGray,
                selection: Color::Blue,
                selection_fg: Color::White,
                success: Color::Green,
                warn: Color::Yellow,
                error: Color::Red,
                header: Color::Cyan,
                shimmer: Color::DarkGray,
                panel_logs: Color::Magenta,
                border_type: BorderType::Plain,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn selected_row(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_row(&self) -> Style {
        Style::default()
            .fg(self.header)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeKind::default())
    }
}
