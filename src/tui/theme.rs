//! TUI palettes.
//!
//! The persisted preference is a single dark/light flag; [`Theme::for_preference`]
//! turns it into the palette every draw function receives explicitly.

use ratatui::style::{Color, Modifier, Style};

/// Application palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Name of the theme.
    pub name: &'static str,
    /// Background color.
    pub background: Color,
    /// Body text color.
    pub foreground: Color,
    /// Dates, hints and placeholders.
    pub muted: Color,
    /// Headings and the status bar label.
    pub primary: Color,
    /// Writing prompts.
    pub prompt: Color,
    /// Border color (unfocused).
    pub border: Color,
    /// Border color (focused).
    pub border_focused: Color,
    /// Selection highlight.
    pub selection: Color,
    /// Warnings such as session-only storage.
    pub warning: Color,
    /// Confirmations.
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Palette for the stored preference.
    pub fn for_preference(is_dark: bool) -> Self {
        if is_dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Dark palette.
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::Black,
            foreground: Color::Gray,
            muted: Color::DarkGray,
            primary: Color::White,
            prompt: Color::LightBlue,
            border: Color::DarkGray,
            border_focused: Color::LightBlue,
            selection: Color::DarkGray,
            warning: Color::Yellow,
            success: Color::Green,
        }
    }

    /// Light palette.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::White,
            foreground: Color::Black,
            muted: Color::Gray,
            primary: Color::Black,
            prompt: Color::Blue,
            border: Color::Gray,
            border_focused: Color::Blue,
            selection: Color::LightBlue,
            warning: Color::Red,
            success: Color::Green,
        }
    }

    /// Base style for panels.
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// Get style for borders.
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get style for selected items.
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for panel headings.
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for writing prompts.
    pub fn prompt_style(&self) -> Style {
        Style::default()
            .fg(self.prompt)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for dates and hints.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Get style for warnings.
    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for success.
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_maps_to_palette() {
        assert_eq!(Theme::for_preference(true).name, "dark");
        assert_eq!(Theme::for_preference(false).name, "light");
        assert_eq!(Theme::default(), Theme::light());
    }
}
