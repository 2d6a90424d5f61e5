use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, PromptKind, Screen};
use crate::color::Channel;
use crate::color::formats::Format;
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                let ev = match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) if mouse_enabled => InputEvent::Mouse(m),
                    Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::debug!(error = %e, "terminal read failed");
                        continue;
                    }
                };
                if tx.blocking_send(Event::Input(ev)).is_err() {
                    break;
                }
            } else if tx.is_closed() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match (state.screen, m.kind) {
            (_, _) if state.prompt.is_some() => None,
            (Screen::Picker, MouseEventKind::ScrollUp) => Some(Action::AdjustChannel(1)),
            (Screen::Picker, MouseEventKind::ScrollDown) => Some(Action::AdjustChannel(-1)),
            (_, MouseEventKind::ScrollUp) => Some(Action::ListUp),
            (_, MouseEventKind::ScrollDown) => Some(Action::ListDown),
            _ => None,
        },
        InputEvent::Key(k) => {
            if k.modifiers.contains(KeyModifiers::CONTROL) {
                return handle_control(k, state.prompt.is_some());
            }
            if state.prompt.is_some() {
                return handle_prompt(k);
            }
            let screen_action = match state.screen {
                Screen::Picker => handle_picker_screen(k),
                Screen::Recent => handle_list_screen(k),
                Screen::Favorites => handle_favorites_screen(k),
                Screen::Names | Screen::Help => None,
            };
            screen_action.or_else(|| handle_global(k))
        }
    }
}

/// Ctrl chords never fall through to the plain-letter bindings.
fn handle_control(k: KeyEvent, in_prompt: bool) -> Option<Action> {
    match k.code {
        KeyCode::Char('c') if in_prompt => Some(Action::CancelPrompt),
        KeyCode::Char('c') => Some(Action::Quit),
        KeyCode::Char('u') if in_prompt => Some(Action::ClearInput),
        _ => None,
    }
}

fn handle_prompt(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc => Some(Action::CancelPrompt),
        KeyCode::Enter => Some(Action::SubmitPrompt),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_global(k: KeyEvent) -> Option<Action> {
    match k.code {
        // Quit
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc => Some(Action::Quit),

        // Screens
        KeyCode::Tab => Some(Action::NextScreen),
        KeyCode::BackTab => Some(Action::PrevScreen),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevScreen),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::NextScreen),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            Some(Action::SetScreen(Screen::from_index(idx)))
        }
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::SetScreen(Screen::Help)),

        // Current color
        KeyCode::Char('p') => Some(Action::TogglePicking),
        KeyCode::Char('#') => Some(Action::OpenPrompt(PromptKind::Hex)),
        KeyCode::Char('f') => Some(Action::AddFavorite),
        KeyCode::Char('s') => Some(Action::OpenPrompt(PromptKind::SaveSwatch)),

        // Clipboard
        KeyCode::Char('y') => Some(Action::CopyInfo),
        KeyCode::Char('Y') => Some(Action::CopyFormat(Format::Hex)),
        KeyCode::Char('x') => Some(Action::CopyFormat(Format::Rgb)),
        KeyCode::Char('c') => Some(Action::CopyFormat(Format::Cmyk)),
        KeyCode::Char('n') => Some(Action::CopyName),

        _ => None,
    }
}

fn handle_picker_screen(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::AdjustChannel(1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::AdjustChannel(-1)),
        KeyCode::Char('K') | KeyCode::PageUp => Some(Action::AdjustChannel(16)),
        KeyCode::Char('J') | KeyCode::PageDown => Some(Action::AdjustChannel(-16)),
        KeyCode::Char('r') => Some(Action::FocusChannel(Channel::Red)),
        KeyCode::Char('g') => Some(Action::FocusChannel(Channel::Green)),
        KeyCode::Char('b') => Some(Action::FocusChannel(Channel::Blue)),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ChannelNext),
        _ => None,
    }
}

fn handle_list_screen(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::GoTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::GoBottom),
        KeyCode::Enter => Some(Action::Activate),
        _ => None,
    }
}

fn handle_favorites_screen(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::RemoveFavorite),
        KeyCode::Char('i') => Some(Action::OpenPrompt(PromptKind::ImportFavorites)),
        KeyCode::Char('e') => Some(Action::OpenPrompt(PromptKind::ExportFavorites)),
        _ => handle_list_screen(k),
    }
}
