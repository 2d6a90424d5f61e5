use super::{to_color, truncate_str};
use crate::app::state::AppState;
use crate::color::NameHit;
use crate::color::tables::TableSource;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
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

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(state.table_summary.len() as u16 + 2),
        ])
        .split(padded);

    let max_width = rows[0].width.saturating_sub(4) as usize;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(icons.swatch, Style::default().fg(to_color(state.current))),
            Span::raw(" "),
            Span::styled(
                state.formats.hex.clone(),
                Style::default()
                    .fg(theme.palette.fg_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", state.formats.rgb_string()),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ]),
        Line::default(),
    ];

    if state.names.is_empty() {
        lines.push(Line::from(Span::styled(
            "No color tables loaded.",
            Style::default().fg(theme.palette.fg_secondary),
        )));
    }
    for hit in &state.names {
        let line = match hit {
            NameHit::Exact { database, name } => Line::from(vec![
                Span::styled(
                    format!("{:<22}", database.label()),
                    Style::default().fg(theme.palette.accent_alt),
                ),
                Span::styled(
                    truncate_str(name, max_width.saturating_sub(22)),
                    Style::default()
                        .fg(theme.palette.fg_primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            NameHit::Approx { .. } => Line::from(Span::styled(
                truncate_str(&hit.to_string(), max_width),
                Style::default().fg(theme.palette.fg_primary),
            )),
        };
        lines.push(line);
    }
    frame.render_widget(Paragraph::new(lines), rows[0]);

    let mut summary = vec![Line::from(Span::styled(
        "━━ Tables ━━",
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    ))];
    for (database, count, source) in &state.table_summary {
        let source = match source {
            TableSource::File => "file",
            TableSource::Builtin => "built-in",
        };
        summary.push(Line::from(vec![
            Span::styled(
                format!("{:<22}", database.label()),
                Style::default().fg(theme.palette.fg_primary),
            ),
            Span::styled(
                format!("{count:>6}  {source}"),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(summary), rows[1]);
}
