//! Theme definitions for the TUI.
//!
//! Colorblind-safe themes for dark and light terminals. The default is
//! "dark"; users can configure "light" via config file or env var.

use ratatui::style::Color;

use crate::models::ApplicationStatus;

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeName::Light,
            _ => ThemeName::Dark,
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    #[allow(dead_code)]
    pub name: ThemeName,

    // Base colors
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,

    // Status colors (colorblind-safe)
    pub applied: Color,
    pub interview: Color,
    pub offered: Color,
    pub rejected: Color,

    // UI elements
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub error: Color,
    pub warn: Color,
    pub success: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,

            fg: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            // Colorblind-safe palette for dark backgrounds
            applied: Color::Rgb(80, 160, 255),  // Light blue
            interview: Color::Rgb(255, 180, 0), // Orange (not yellow - better visibility)
            offered: Color::Rgb(0, 200, 0),     // Bright green
            rejected: Color::Rgb(255, 80, 80),  // Bright red

            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,
            header_bg: Color::Rgb(40, 80, 120),
            header_fg: Color::White,
            error: Color::Rgb(255, 100, 100),
            warn: Color::Rgb(255, 180, 0),
            success: Color::Rgb(0, 200, 0),
            accent: Color::Cyan,
        }
    }

    /// Create a light theme
    /// Uses darker, more saturated colors for visibility on light backgrounds
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,

            fg: Color::Black,
            border: Color::Rgb(120, 120, 120),
            border_focused: Color::Rgb(0, 100, 180),

            applied: Color::Rgb(0, 80, 180),    // Dark blue
            interview: Color::Rgb(200, 120, 0), // Dark orange
            offered: Color::Rgb(0, 140, 0),     // Dark green
            rejected: Color::Rgb(200, 0, 0),    // Dark red

            selected_bg: Color::Rgb(200, 220, 255),
            selected_fg: Color::Black,
            header_bg: Color::Rgb(180, 200, 230),
            header_fg: Color::Black,
            error: Color::Rgb(200, 0, 0),
            warn: Color::Rgb(200, 120, 0),
            success: Color::Rgb(0, 140, 0),
            accent: Color::Rgb(0, 100, 180),
        }
    }

    /// Create theme from name string
    pub fn from_name(name: &str) -> Self {
        match ThemeName::from_str(name) {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Get color for an application status. Values outside the enumeration
    /// fall back to the default foreground.
    pub fn status_color(&self, status: &ApplicationStatus) -> Color {
        match status {
            ApplicationStatus::Applied => self.applied,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Offered => self.offered,
            ApplicationStatus::Rejected => self.rejected,
            ApplicationStatus::Other(_) => self.fg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let dark = Theme::from_name("dark");
        assert_eq!(dark.name, ThemeName::Dark);

        let light = Theme::from_name("light");
        assert_eq!(light.name, ThemeName::Light);

        // Unknown defaults to dark
        let unknown = Theme::from_name("unknown");
        assert_eq!(unknown.name, ThemeName::Dark);
    }

    #[test]
    fn test_status_colors() {
        let theme = Theme::dark();
        assert_eq!(
            theme.status_color(&ApplicationStatus::Applied),
            theme.applied
        );
        assert_eq!(
            theme.status_color(&ApplicationStatus::Rejected),
            theme.rejected
        );
        assert_eq!(
            theme.status_color(&ApplicationStatus::Other("GHOSTED".into())),
            theme.fg
        );
    }
}
