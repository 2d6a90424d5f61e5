pub mod color_list;
pub mod help;
pub mod names;
pub mod picker;
pub mod root;
pub mod sidebar;

use ratatui::style::Color;

use crate::color::Rgb;

pub(crate) fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Text color that stays readable on top of `rgb`.
pub(crate) fn contrast(rgb: Rgb) -> Color {
    if rgb.is_dark() {
        Color::Rgb(255, 255, 255)
    } else {
        Color::Rgb(0, 0, 0)
    }
}

pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}
