use crate::ui::theme::Theme;
use crate::utils::color;
use ratatui::style::{Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for the highlighted list row.
///
pub fn current_list_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for active sidebar entries.
///
pub fn active_list_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.primary.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

pub fn secondary_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_secondary.to_color())
}

pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for a label chip with the given hex color.
///
pub fn label_chip_style(theme: &Theme, label_color: &str) -> Style {
    let surface = (theme.surface.r, theme.surface.g, theme.surface.b);
    let (fg, bg) = color::chip_colors(label_color, surface, theme.text_secondary.to_color());
    Style::default().fg(fg).bg(bg)
}
