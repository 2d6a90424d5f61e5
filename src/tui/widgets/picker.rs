//! Picker screen: swatch, manual channel chooser and the five formats.

use super::{contrast, to_color, truncate_str};
use crate::app::state::AppState;
use crate::color::Channel;
use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_swatch(frame, state, cols[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // channel bars
            Constraint::Length(7), // formats
            Constraint::Min(2),    // name + picking status
        ])
        .split(cols[1]);

    render_channels(frame, state, &theme, right[0]);
    render_formats(frame, state, &theme, right[1]);
    render_name(frame, state, &theme, right[2]);
}

fn render_swatch(frame: &mut Frame, state: &AppState, area: Rect) {
    let rgb = state.current;
    let block = Block::default().style(Style::default().bg(to_color(rgb)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top = inner.height.saturating_sub(1) / 2;
    let mut lines = vec![Line::default(); top as usize];
    lines.push(Line::from(Span::styled(
        rgb.to_hex(),
        Style::default()
            .fg(contrast(rgb))
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_channels(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let icons = &theme.icons;
    // label + value + padding
    let bar_width = area.width.saturating_sub(12) as usize;

    let mut lines = Vec::with_capacity(4);
    for channel in Channel::ALL {
        let value = state.current.channel(channel);
        let focused = channel == state.channel;
        let filled = bar_width * value as usize / 255;

        let label_style = if focused {
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.palette.fg_secondary)
        };
        let prefix = if focused { icons.selected } else { icons.unselected };

        lines.push(Line::from(vec![
            Span::styled(format!("{prefix} {} ", channel.label()), label_style),
            Span::styled(icons.bar_full.repeat(filled), Style::default().fg(theme.palette.accent_alt)),
            Span::styled(
                icons.bar_empty.repeat(bar_width - filled),
                Style::default().fg(theme.palette.border),
            ),
            Span::styled(format!(" {value:>3}"), label_style),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "r/g/b focus  k/j ±1  K/J ±16  # enter",
        Style::default().fg(theme.palette.fg_secondary),
    )));
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_formats(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let mut lines = vec![Line::default()];
    for (label, value) in state.formats.rows() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {label:<6}"),
                Style::default()
                    .fg(theme.palette.accent_alt)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(value, Style::default().fg(theme.palette.fg_primary)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_name(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let icons = &theme.icons;
    let max_width = area.width.saturating_sub(10) as usize;

    let name = match state.names.first() {
        Some(hit) => truncate_str(&hit.to_string(), max_width),
        None => "unknown".to_string(),
    };
    let mut lines = vec![
        Line::default(),
        Line::from(vec![
            Span::styled("  Name  ", Style::default().fg(theme.palette.accent_alt)),
            Span::styled(
                name,
                Style::default()
                    .fg(theme.palette.fg_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if state.favorites.contains(state.current) {
        lines.push(Line::from(Span::styled(
            format!("  {} in favorites", icons.favorite),
            Style::default().fg(theme.palette.fg_secondary),
        )));
    }
    if state.picking {
        lines.push(Line::from(Span::styled(
            format!("  {} picking (p to stop)", icons.picking),
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
