use ratatui::style::Color;

// Themes only pick colors for chrome and the dock. Nothing in the store or
// the manager looks at them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub header_bg: Color,
    pub header_fg: Color,
    pub inactive_header_bg: Color,
    pub inactive_header_fg: Color,
    pub border: Color,
    pub body_bg: Color,
    pub control_fg: Color,
    pub dock_bg: Color,
    pub dock_fg: Color,
    pub dock_active_bg: Color,
    pub dock_active_fg: Color,
    pub dock_minimized_fg: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            header_bg: Color::Blue,
            header_fg: Color::White,
            inactive_header_bg: Color::DarkGray,
            inactive_header_fg: Color::White,
            border: Color::DarkGray,
            body_bg: Color::Reset,
            control_fg: Color::White,
            dock_bg: Color::DarkGray,
            dock_fg: Color::Black,
            dock_active_bg: Color::Gray,
            dock_active_fg: Color::Black,
            dock_minimized_fg: Color::Gray,
        }
    }
}

impl Palette {
    pub fn midnight() -> Self {
        Self {
            header_bg: Color::Rgb(200, 100, 0),
            header_fg: Color::Black,
            inactive_header_bg: Color::Rgb(40, 40, 48),
            inactive_header_fg: Color::Gray,
            border: Color::Rgb(60, 60, 72),
            body_bg: Color::Black,
            control_fg: Color::Black,
            dock_bg: Color::Rgb(24, 24, 30),
            dock_fg: Color::Gray,
            dock_active_bg: Color::Rgb(255, 165, 0),
            dock_active_fg: Color::Black,
            dock_minimized_fg: Color::DarkGray,
        }
    }

    pub fn paper() -> Self {
        Self {
            header_bg: Color::Gray,
            header_fg: Color::Black,
            inactive_header_bg: Color::White,
            inactive_header_fg: Color::DarkGray,
            border: Color::Gray,
            body_bg: Color::White,
            control_fg: Color::Black,
            dock_bg: Color::White,
            dock_fg: Color::Black,
            dock_active_bg: Color::Gray,
            dock_active_fg: Color::Black,
            dock_minimized_fg: Color::DarkGray,
        }
    }
}

/// Theme selector: a named built-in palette or a caller-built one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Theme {
    Named(String),
    Custom(Palette),
}

impl Default for Theme {
    fn default() -> Self {
        Self::Named("default".to_string())
    }
}

impl From<&str> for Theme {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<Palette> for Theme {
    fn from(palette: Palette) -> Self {
        Self::Custom(palette)
    }
}

impl Theme {
    pub const NAMES: [&'static str; 3] = ["default", "midnight", "paper"];

    /// Resolve to concrete colors. Unknown names fall back to the default
    /// palette.
    pub fn palette(&self) -> Palette {
        match self {
            Theme::Custom(palette) => *palette,
            Theme::Named(name) => match name.as_str() {
                "midnight" => Palette::midnight(),
                "paper" => Palette::paper(),
                "default" => Palette::default(),
                other => {
                    tracing::trace!(theme = other, "unknown theme, using default palette");
                    Palette::default()
                }
            },
        }
    }
}
