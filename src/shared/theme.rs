use ratatui::style::{Color, Modifier, Style};

use super::config::ThemeMode;

/// Color palette for the todo screen
#[derive(Debug, Clone)]
pub struct ModernTheme {
    // Primary colors
    pub primary: Color,
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,

    // Interactive colors
    pub selected: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Default for ModernTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ModernTheme {
    /// Palette for a configured theme mode
    pub fn for_mode(mode: &ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
            ThemeMode::Ocean => Self::ocean(),
        }
    }

    /// Dark theme with indigo accents
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(99, 102, 241),
            accent: Color::Rgb(129, 140, 248),
            success: Color::Rgb(74, 222, 128),
            warning: Color::Rgb(250, 204, 21),
            danger: Color::Rgb(248, 113, 113),
            info: Color::Rgb(96, 165, 250),
            text_primary: Color::Rgb(229, 231, 235),
            text_secondary: Color::Rgb(156, 163, 175),
            text_disabled: Color::Rgb(107, 114, 128),
            selected: Color::Rgb(55, 48, 163),
            border: Color::Rgb(55, 65, 81),
            border_focused: Color::Rgb(129, 140, 248),
        }
    }

    /// Gray text on a white background with a blue accent
    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(51, 51, 51),
            accent: Color::Rgb(0, 122, 255),
            success: Color::Rgb(22, 163, 74),
            warning: Color::Rgb(217, 119, 6),
            danger: Color::Rgb(220, 38, 38),
            info: Color::Rgb(37, 99, 235),
            text_primary: Color::Rgb(51, 51, 51),
            text_secondary: Color::Rgb(102, 102, 102),
            text_disabled: Color::Rgb(170, 170, 170),
            selected: Color::Rgb(191, 219, 254),
            border: Color::Rgb(221, 221, 221),
            border_focused: Color::Rgb(0, 122, 255),
        }
    }

    /// Dark theme with sea-blue accents, sharing the dark status colors
    pub fn ocean() -> Self {
        Self {
            primary: Color::Rgb(56, 189, 248),
            accent: Color::Rgb(45, 212, 191),
            text_primary: Color::Rgb(240, 249, 255),
            text_secondary: Color::Rgb(125, 160, 190),
            text_disabled: Color::Rgb(80, 110, 140),
            selected: Color::Rgb(12, 74, 110),
            border: Color::Rgb(30, 64, 94),
            border_focused: Color::Rgb(56, 189, 248),
            ..Self::dark()
        }
    }

    /// Style for titles and headers
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for secondary text
    pub fn secondary_text_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn danger_style(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Style for the selected list row
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for keyboard shortcut hints
    pub fn key_hint_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for numbers and metrics
    pub fn metric_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for dimmed/disabled elements
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.text_disabled)
    }

    /// Style for an open todo
    pub fn pending_item_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Style for a finished todo: dimmed and struck through
    pub fn completed_item_style(&self) -> Style {
        Style::default()
            .fg(self.text_disabled)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Progress bar color, greener as more todos are done
    pub fn progress_style_for_percentage(&self, percentage: f64) -> Style {
        let color = if percentage >= 80.0 {
            self.success
        } else if percentage >= 40.0 {
            self.info
        } else {
            self.warning
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Iconography using Unicode symbols
pub struct ModernIcons;

impl ModernIcons {
    // Todo status icons
    pub const COMPLETED: &'static str = "✓"; // Check mark
    pub const PENDING: &'static str = "○"; // Hollow circle

    // Sync status icons
    pub const SAVED: &'static str = "●"; // Solid circle
    pub const UNSAVED: &'static str = "◐"; // Half circle

    // UI elements
    pub const INPUT: &'static str = "✎"; // Pencil
    pub const CURSOR: &'static str = "▏";
    pub const ARROW_RIGHT: &'static str = "▶";
    pub const BULLET: &'static str = "•";
    pub const HELP: &'static str = "?";

    // Status message icons
    pub const INFO: &'static str = "ℹ";
    pub const SUCCESS: &'static str = "✓";
    pub const WARNING: &'static str = "⚠";
    pub const ERROR: &'static str = "✗";
}

/// Characters for progress bars
pub struct ProgressChars;

impl ProgressChars {
    pub const FILLED: char = '█'; // Full block
    pub const EMPTY: char = '░'; // Light shade
    pub const PARTIAL: char = '▒'; // Medium shade
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_theme_default() {
        let theme = ModernTheme::default();
        assert_eq!(theme.primary, ModernTheme::dark().primary);
        assert_eq!(theme.success, Color::Rgb(74, 222, 128));
    }

    #[test]
    fn test_ocean_shares_dark_status_colors() {
        let ocean = ModernTheme::ocean();
        let dark = ModernTheme::dark();
        assert_eq!(ocean.danger, dark.danger);
        assert_eq!(ocean.success, dark.success);
        assert_ne!(ocean.primary, dark.primary);
    }

    #[test]
    fn test_for_mode_matches_constructors() {
        assert_eq!(
            ModernTheme::for_mode(&ThemeMode::Light).primary,
            ModernTheme::light().primary
        );
        assert_eq!(
            ModernTheme::for_mode(&ThemeMode::Ocean).primary,
            ModernTheme::ocean().primary
        );
        assert_eq!(
            ModernTheme::for_mode(&ThemeMode::Dark).primary,
            ModernTheme::dark().primary
        );
    }

    #[test]
    fn test_completed_item_style() {
        let theme = ModernTheme::dark();
        let style = theme.completed_item_style();
        assert_eq!(style.fg, Some(theme.text_disabled));
        assert!(style.add_modifier.contains(Modifier::CROSSED_OUT));
        assert!(!theme
            .pending_item_style()
            .add_modifier
            .contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_progress_style_for_percentage() {
        let theme = ModernTheme::dark();
        assert_eq!(theme.progress_style_for_percentage(100.0).fg, Some(theme.success));
        assert_eq!(theme.progress_style_for_percentage(50.0).fg, Some(theme.info));
        assert_eq!(theme.progress_style_for_percentage(0.0).fg, Some(theme.warning));
    }

    #[test]
    fn test_selected_style_has_background() {
        let theme = ModernTheme::ocean();
        assert_eq!(theme.selected_style().bg, Some(theme.selected));
    }
}
