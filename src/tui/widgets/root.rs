//! Root layout widget - orchestrates main layout structure

use crate::app::state::{AppState, Screen, ToastKind};
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{color_list, help, names, picker, sidebar, to_color, truncate_str};

/// Main layout structure:
/// ┌──────────┬─────────────────────────────────────────┐
/// │  Menu    │           Main Content                  │
/// │          │   (Picker/Names/Recent/Favorites/Help)  │
/// ├──────────┴─────────────────────────────────────────┤
/// │ status: prompt, toast or current color             │
/// └────────────────────────────────────────────────────┘
pub fn render(frame: &mut Frame, state: &AppState) {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // sidebar + content
            Constraint::Length(3), // status bar
        ])
        .split(root);

    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // sidebar menu
            Constraint::Min(40),    // main content
        ])
        .split(rows[0]);

    sidebar::render(frame, state, top_cols[0]);
    render_main_content(frame, state, top_cols[1]);
    render_status_bar(frame, state, rows[1]);
}

fn render_main_content(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let title = format!(" {} {} ", icons.screen(state.screen), state.screen.title());

    let main = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = main.inner(area);
    frame.render_widget(main, area);

    match state.screen {
        Screen::Picker => picker::render(frame, state, inner),
        Screen::Names => names::render(frame, state, inner),
        Screen::Recent => color_list::render_recent(frame, state, inner),
        Screen::Favorites => color_list::render_favorites(frame, state, inner),
        Screen::Help => help::render(frame, inner),
    }
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max_width = inner.width.saturating_sub(2) as usize;

    let line = if let Some(prompt) = &state.prompt {
        Line::from(vec![
            Span::styled(
                format!(" {}: ", prompt.kind.label()),
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(prompt.input.clone(), Style::default().fg(theme.palette.fg_primary)),
            Span::styled("█", Style::default().fg(theme.palette.accent_alt)),
        ])
    } else if let Some(toast) = &state.toast {
        let icon = match toast.kind {
            ToastKind::Success => icons.success,
            ToastKind::Info => icons.info,
            ToastKind::Error => icons.error,
        };
        let style = match toast.kind {
            ToastKind::Error => Style::default()
                .fg(theme.palette.fg_primary)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ToastKind::Success | ToastKind::Info => Style::default().fg(theme.palette.fg_primary),
        };
        Line::from(Span::styled(
            truncate_str(&format!(" {icon} {}", toast.message), max_width),
            style,
        ))
    } else {
        let name = state.primary_name().unwrap_or("unknown");
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(icons.swatch, Style::default().fg(to_color(state.current))),
            Span::styled(
                format!(" {}  {}", state.formats.hex, truncate_str(name, 40)),
                Style::default().fg(theme.palette.fg_primary),
            ),
        ];
        if state.picking {
            spans.push(Span::styled(
                format!("  {} picking", icons.picking),
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::styled(
            "   ? help  q quit",
            Style::default().fg(theme.palette.fg_secondary),
        ));
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), inner);
}
