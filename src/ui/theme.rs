use crate::model::{Priority, Status};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub primary: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_secondary: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Message colors
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Issue status colors
    pub status_backlog: ColorSpec,
    pub status_todo: ColorSpec,
    pub status_in_progress: ColorSpec,
    pub status_done: ColorSpec,
    pub status_cancelled: ColorSpec,

    // Issue priority colors
    pub priority_urgent: ColorSpec,
    pub priority_high: ColorSpec,
    pub priority_medium: ColorSpec,
    pub priority_low: ColorSpec,

    // Footer mode colors
    pub footer_normal: ColorSpec,
    pub footer_search: ColorSpec,
    pub footer_edit: ColorSpec,
    pub footer_delete: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: rgb(122, 162, 247), // Blue
            text: rgb(192, 202, 245),
            text_secondary: rgb(169, 177, 214),
            text_muted: rgb(86, 95, 137),
            background: rgb(26, 27, 38),
            surface: rgb(36, 40, 59),
            warning: rgb(224, 175, 104),
            error: rgb(247, 118, 142),
            border_active: rgb(122, 162, 247),
            border_normal: rgb(59, 66, 97),
            highlight_bg: rgb(41, 46, 66),
            highlight_fg: rgb(192, 202, 245),
            status_backlog: rgb(86, 95, 137),
            status_todo: rgb(169, 177, 214),
            status_in_progress: rgb(224, 175, 104),
            status_done: rgb(158, 206, 106),
            status_cancelled: rgb(86, 95, 137),
            priority_urgent: rgb(247, 118, 142),
            priority_high: rgb(255, 158, 100),
            priority_medium: rgb(224, 175, 104),
            priority_low: rgb(125, 207, 255),
            footer_normal: rgb(122, 162, 247),
            footer_search: rgb(125, 207, 255),
            footer_edit: rgb(158, 206, 106),
            footer_delete: rgb(247, 118, 142),
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: rgb(144, 122, 169), // Iris
            text: rgb(87, 82, 121),
            text_secondary: rgb(121, 117, 147),
            text_muted: rgb(152, 147, 165),
            background: rgb(250, 244, 237),
            surface: rgb(255, 250, 243),
            warning: rgb(234, 157, 52),
            error: rgb(180, 99, 122),
            border_active: rgb(144, 122, 169),
            border_normal: rgb(223, 218, 217),
            highlight_bg: rgb(242, 233, 225),
            highlight_fg: rgb(87, 82, 121),
            status_backlog: rgb(152, 147, 165),
            status_todo: rgb(121, 117, 147),
            status_in_progress: rgb(234, 157, 52),
            status_done: rgb(40, 105, 131),
            status_cancelled: rgb(152, 147, 165),
            priority_urgent: rgb(180, 99, 122),
            priority_high: rgb(215, 130, 126),
            priority_medium: rgb(234, 157, 52),
            priority_low: rgb(86, 148, 159),
            footer_normal: rgb(144, 122, 169),
            footer_search: rgb(86, 148, 159),
            footer_edit: rgb(40, 105, 131),
            footer_delete: rgb(180, 99, 122),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: rgb(189, 147, 249), // Purple
            text: rgb(248, 248, 242),
            text_secondary: rgb(191, 191, 191),
            text_muted: rgb(98, 114, 164),
            background: rgb(40, 42, 54),
            surface: rgb(68, 71, 90),
            warning: rgb(241, 250, 140),
            error: rgb(255, 85, 85),
            border_active: rgb(189, 147, 249),
            border_normal: rgb(68, 71, 90),
            highlight_bg: rgb(68, 71, 90),
            highlight_fg: rgb(248, 248, 242),
            status_backlog: rgb(98, 114, 164),
            status_todo: rgb(191, 191, 191),
            status_in_progress: rgb(241, 250, 140),
            status_done: rgb(80, 250, 123),
            status_cancelled: rgb(98, 114, 164),
            priority_urgent: rgb(255, 85, 85),
            priority_high: rgb(255, 184, 108),
            priority_medium: rgb(241, 250, 140),
            priority_low: rgb(139, 233, 253),
            footer_normal: rgb(189, 147, 249),
            footer_search: rgb(139, 233, 253),
            footer_edit: rgb(80, 250, 123),
            footer_delete: rgb(255, 85, 85),
        }
    }

    /// Color of an issue status glyph.
    ///
    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Backlog => self.status_backlog,
            Status::Todo => self.status_todo,
            Status::InProgress => self.status_in_progress,
            Status::Done => self.status_done,
            Status::Cancelled => self.status_cancelled,
        }
        .to_color()
    }

    /// Color of an issue priority glyph.
    ///
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Urgent => self.priority_urgent,
            Priority::High => self.priority_high,
            Priority::Medium => self.priority_medium,
            Priority::Low => self.priority_low,
            Priority::None => self.text_muted,
        }
        .to_color()
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tokyo-night".to_string(),
            "rose-pine-dawn".to_string(),
            "dracula".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_available_theme_resolves() {
        for name in Theme::available_themes() {
            let theme = Theme::from_name(&name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn test_default_is_tokyo_night() {
        assert_eq!(Theme::default().name, "tokyo-night");
    }

    #[test]
    fn test_status_colors_distinguish_progress() {
        let theme = Theme::default();
        assert_ne!(
            theme.status_color(Status::InProgress),
            theme.status_color(Status::Done)
        );
        assert_eq!(
            theme.priority_color(Priority::None),
            theme.text_muted.to_color()
        );
    }
}
