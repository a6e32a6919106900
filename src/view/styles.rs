//! Grid cell styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Configuration for color output.
///
/// Colors are disabled by the `NO_COLOR` environment variable or an explicit
/// flag, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

/// Styles for the grid shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyles {
    /// Decorative header above the windowed content.
    pub header: Style,
    /// Cells in even positions.
    pub cell: Style,
    /// Cells in odd positions (checkerboard contrast).
    pub cell_alt: Style,
    /// Cells emitted while the viewport is actively scrolling.
    pub cell_scrolling: Style,
    /// Status bar at the bottom of the screen.
    pub status: Style,
}

impl GridStyles {
    /// Create styles with the default color scheme.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Create styles honoring the given color configuration.
    ///
    /// With colors disabled every style is the terminal default.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                header: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                cell: Style::default().fg(Color::White),
                cell_alt: Style::default().fg(Color::Gray),
                cell_scrolling: Style::default().add_modifier(Modifier::DIM),
                status: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                header: Style::default(),
                cell: Style::default(),
                cell_alt: Style::default(),
                cell_scrolling: Style::default(),
                status: Style::default(),
            }
        }
    }
}

impl Default for GridStyles {
    fn default() -> Self {
        Self::new()
    }
}
