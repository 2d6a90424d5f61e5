//! Recent and Favorites screens: a scrollable list of colors.

use super::{to_color, truncate_str};
use crate::app::state::{AppState, ListCursor};
use crate::color::Rgb;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

struct Row {
    rgb: Rgb,
    label: String,
}

pub fn render_recent(frame: &mut Frame, state: &AppState, area: Rect) {
    let rows: Vec<Row> = state
        .recent
        .iter()
        .map(|rgb| Row {
            rgb,
            label: rgb.to_hex(),
        })
        .collect();
    render_list(
        frame,
        state,
        &rows,
        &state.recent_list,
        "No recent colors yet. Pick or enter one.",
        "Enter select",
        area,
    );
}

pub fn render_favorites(frame: &mut Frame, state: &AppState, area: Rect) {
    let rows: Vec<Row> = state
        .favorites
        .entries()
        .iter()
        .map(|f| Row {
            rgb: f.rgb,
            label: format!("{}  {}", f.hex, f.name),
        })
        .collect();
    render_list(
        frame,
        state,
        &rows,
        &state.favorites_list,
        "No favorites. Press f to add the current color.",
        "Enter select  d remove  i import  e export",
        area,
    );
}

fn render_list(
    frame: &mut Frame,
    state: &AppState,
    rows: &[Row],
    cursor: &ListCursor,
    empty_msg: &str,
    hints: &str,
    area: Rect,
) {
    let theme = get_theme();
    let icons = &theme.icons;

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area)[1];

    let hint_line = Line::from(Span::styled(
        hints.to_string(),
        Style::default().fg(theme.palette.fg_secondary),
    ));

    if rows.is_empty() {
        let lines = vec![
            Line::from(Span::styled(
                empty_msg.to_string(),
                Style::default().fg(theme.palette.fg_secondary),
            )),
            Line::default(),
            hint_line,
        ];
        frame.render_widget(Paragraph::new(lines), padded);
        return;
    }

    // -2 for hints and spacer
    let visible_height = padded.height.saturating_sub(2) as usize;
    let max_width = padded.width.saturating_sub(10) as usize;

    let mut lines: Vec<Line> = Vec::with_capacity(visible_height + 2);
    for (i, row) in rows
        .iter()
        .enumerate()
        .skip(cursor.scroll_offset)
        .take(visible_height)
    {
        let is_selected = i == cursor.selected;
        let is_current = row.rgb == state.current;

        let style = if is_selected {
            Style::default()
                .fg(theme.palette.fg_primary)
                .bg(theme.palette.bg_highlight)
                .add_modifier(Modifier::BOLD)
        } else if is_current {
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.palette.fg_primary)
        };
        let prefix = if is_selected { icons.selected } else { icons.unselected };

        lines.push(Line::from(vec![
            Span::styled(format!("{prefix} "), Style::default().fg(theme.palette.accent)),
            Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(theme.palette.fg_secondary)),
            Span::styled(icons.swatch, Style::default().fg(to_color(row.rgb))),
            Span::raw(" "),
            Span::styled(truncate_str(&row.label, max_width), style),
        ]));
    }
    lines.push(Line::default());
    lines.push(hint_line);

    frame.render_widget(Paragraph::new(lines), padded);
}
