use crate::app::state::{AppState, Screen};
use crate::tui::theme::get_theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(" Menu ")
        .title_style(Style::default().fg(theme.palette.accent));

    let items: Vec<ListItem> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, &screen)| {
            let is_selected = screen == state.screen;

            let style = if is_selected {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };

            let icon_style = if is_selected {
                Style::default().fg(theme.palette.accent)
            } else {
                Style::default().fg(theme.palette.fg_secondary)
            };

            let prefix = if is_selected { icons.selected } else { icons.unselected };

            let mut spans = vec![
                Span::styled(prefix, icon_style),
                Span::raw(" "),
                Span::styled(icons.screen(screen), icon_style),
                Span::raw(" "),
                Span::styled(screen.title(), style),
                Span::styled(format!(" {}", i + 1), Style::default().fg(theme.palette.fg_secondary)),
            ];
            let count = match screen {
                Screen::Recent => Some(state.recent.len()),
                Screen::Favorites => Some(state.favorites.len()),
                _ => None,
            };
            if let Some(n) = count {
                spans.push(Span::styled(format!(" ({n})"), Style::default().fg(theme.palette.fg_secondary)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.screen.index()));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("");

    frame.render_stateful_widget(list, area, &mut list_state);
}
