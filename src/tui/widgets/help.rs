//! Help screen showing keybindings

use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left_content = vec![
        section_header("Navigation", &theme),
        keybind("Tab / l", "Next screen", &theme),
        keybind("S-Tab / h", "Previous screen", &theme),
        keybind("1-5", "Go to screen", &theme),
        keybind("?", "This help", &theme),
        keybind("q / Esc", "Quit", &theme),
        keybind("Ctrl+c", "Quit", &theme),
        Line::default(),
        section_header("Picker", &theme),
        keybind("p", "Toggle screen picking", &theme),
        keybind("r / g / b", "Focus channel", &theme),
        keybind("Space", "Next channel", &theme),
        keybind("k / j", "Channel +1 / -1", &theme),
        keybind("K / J", "Channel +16 / -16", &theme),
        keybind("#", "Enter a color", &theme),
    ];
    frame.render_widget(Paragraph::new(left_content).wrap(Wrap { trim: false }), cols[0]);

    let right_content = vec![
        section_header("Current color", &theme),
        keybind("f", "Add to favorites", &theme),
        keybind("y", "Copy all info", &theme),
        keybind("Y", "Copy HEX", &theme),
        keybind("x", "Copy RGB", &theme),
        keybind("c", "Copy CMYK", &theme),
        keybind("n", "Copy name", &theme),
        keybind("s", "Save swatch image", &theme),
        Line::default(),
        section_header("Recent / Favorites", &theme),
        keybind("j / k", "Move", &theme),
        keybind("Enter", "Use selected color", &theme),
        keybind("d", "Remove favorite", &theme),
        keybind("i / e", "Import / export favorites", &theme),
        Line::default(),
        section_header("Prompt", &theme),
        keybind("Enter", "Confirm", &theme),
        keybind("Esc / Ctrl+c", "Cancel", &theme),
        keybind("Ctrl+u", "Clear input", &theme),
    ];
    frame.render_widget(Paragraph::new(right_content).wrap(Wrap { trim: false }), cols[1]);
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:12}", key),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
