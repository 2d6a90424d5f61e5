pub mod actions;
pub mod events;
pub mod state;

use crate::color::{NamedColorSet, Rgb};
use crate::config::Config;
use crate::favorites::FavoriteEntry;
use crate::input;
use crate::output;
use crate::sampler::{self, CommandSampler, PickHandle};
use crate::storage::{Session, SettingsService};
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::Event;
use state::{AppState, Prompt, PromptKind, Screen, Toast};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    state: AppState,
    colors: NamedColorSet,
    settings: SettingsService,
    sampler: Option<Arc<CommandSampler>>,
    pick: Option<PickHandle>,
    last_sample: Option<Rgb>,
}

impl App {
    pub fn new(cfg: Config) -> Self {
        let colors = NamedColorSet::load(&cfg.paths.tables_dir);
        let settings = SettingsService::new(cfg.paths.settings_db());
        let sampler = CommandSampler::from_argv(&cfg.picker.sampler_command).map(Arc::new);
        Self::with_parts(cfg, colors, settings, sampler)
    }

    fn with_parts(
        cfg: Config,
        colors: NamedColorSet,
        settings: SettingsService,
        sampler: Option<Arc<CommandSampler>>,
    ) -> Self {
        let session = settings.load();

        let mut state = AppState::new();
        state.table_summary = colors.summary();
        state.screen = session
            .last_screen
            .as_deref()
            .and_then(Screen::from_key)
            .unwrap_or(Screen::Picker);
        let start = session
            .current
            .or_else(|| session.recent.latest())
            .unwrap_or(Rgb::WHITE);
        state.recent = session.recent;
        state.favorites = session.favorites;
        state.show_color(start, colors.all_names(start));

        Self {
            cfg,
            state,
            colors,
            settings,
            sampler,
            pick: None,
            last_sample: None,
        }
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);

        let result = self.event_loop(terminal, &tx, &mut rx).await;
        self.finish(result)
    }

    async fn event_loop(
        &mut self,
        terminal: &mut TuiTerminal,
        tx: &mpsc::Sender<Event>,
        rx: &mut mpsc::Receiver<Event>,
    ) -> anyhow::Result<()> {
        tui::draw(terminal, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, tx).await;
                    }
                }
                Event::Sample(rgb) => self.on_sample(rgb),
                Event::SampleError(msg) => {
                    self.stop_picking();
                    self.state.toast = Some(Toast::error(format!("Picking stopped: {msg}")));
                }
            }

            if self.state.should_quit {
                break;
            }

            tui::draw(terminal, &mut self.state)?;
        }
        Ok(())
    }

    /// Shutdown runs whether or not the loop failed.
    fn finish(&mut self, result: anyhow::Result<()>) -> anyhow::Result<()> {
        self.stop_picking();
        self.save_state_on_quit();
        result
    }

    fn session(&self) -> Session {
        Session {
            recent: self.state.recent.clone(),
            favorites: self.state.favorites.clone(),
            last_screen: Some(self.state.screen.key().to_string()),
            current: Some(self.state.current),
        }
    }

    fn save_state_on_quit(&self) {
        self.settings.save(&self.session());
        tracing::info!("session saved");
    }

    /// Make `rgb` the current color and remember it.
    fn select_color(&mut self, rgb: Rgb) {
        self.state.recent.push(rgb);
        self.state.show_color(rgb, self.colors.all_names(rgb));
    }

    fn on_sample(&mut self, rgb: Rgb) {
        if !self.state.picking || self.last_sample == Some(rgb) {
            return;
        }
        self.last_sample = Some(rgb);
        self.select_color(rgb);
    }

    fn start_picking(&mut self, tx: &mpsc::Sender<Event>) {
        let Some(sampler) = self.sampler.clone() else {
            self.state.toast = Some(Toast::error(
                "No sampler configured (set [picker] sampler_command)",
            ));
            return;
        };
        tracing::info!(program = sampler.program(), "picking started");
        self.last_sample = None;
        self.pick = Some(sampler::spawn_pick_task(
            sampler,
            self.cfg.picker.poll_interval(),
            tx.clone(),
        ));
        self.state.picking = true;
    }

    fn stop_picking(&mut self) {
        if let Some(handle) = self.pick.take() {
            handle.stop();
            tracing::info!("picking stopped");
        }
        self.state.picking = false;
    }

    async fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Activate => {
                let picked = match self.state.screen {
                    Screen::Recent => self.state.selected_recent(),
                    Screen::Favorites => self.state.selected_favorite_rgb(),
                    _ => None,
                };
                if let Some(rgb) = picked {
                    self.stop_picking();
                    self.select_color(rgb);
                    self.state.recent_list.selected = 0;
                    self.state.toast = Some(Toast::info(format!("Selected {}", rgb.to_hex())));
                }
            }
            Action::AdjustChannel(delta) => {
                self.stop_picking();
                let rgb = self.state.current.adjusted(self.state.channel, delta);
                if rgb != self.state.current {
                    self.select_color(rgb);
                }
            }
            Action::TogglePicking => {
                if self.pick.is_some() {
                    self.stop_picking();
                    self.state.toast = Some(Toast::info("Picking off"));
                } else {
                    self.start_picking(tx);
                }
            }
            Action::OpenPrompt(kind) => {
                let initial = self.prompt_default(kind);
                self.state.prompt = Some(Prompt::new(kind, initial));
            }
            Action::SubmitPrompt => {
                if let Some(prompt) = self.state.prompt.take() {
                    self.submit_prompt(prompt);
                }
            }
            Action::AddFavorite => self.add_favorite(),
            Action::RemoveFavorite => {
                let idx = self.state.favorites_list.selected;
                if let Some(removed) = self.state.favorites.remove(idx) {
                    self.state.favorites_list.clamp(self.state.favorites.len());
                    self.settings.save_favorites(&self.state.favorites);
                    self.state.toast = Some(Toast::success(format!("Removed {}", removed.name)));
                }
            }
            Action::CopyInfo => {
                let text = output::color_info_text(&self.state.formats, &self.state.names);
                self.copy(&text, "color info").await;
            }
            Action::CopyFormat(format) => {
                let text = self.state.formats.get(format);
                self.copy(&text, format.label()).await;
            }
            Action::CopyName => match self.state.primary_name().map(str::to_string) {
                Some(name) => self.copy(&name, "name").await,
                None => self.state.toast = Some(Toast::error("No name for this color")),
            },
            other => self.reduce(other),
        }
    }

    /// State changes with no side effects beyond `AppState`.
    fn reduce(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::NextScreen => self.state.screen = self.state.screen.next(),
            Action::PrevScreen => self.state.screen = self.state.screen.prev(),
            Action::SetScreen(screen) => self.state.screen = screen,
            Action::ListUp => {
                if let Some(list) = self.active_list_mut() {
                    list.select_prev();
                    list.update_scroll(20);
                }
            }
            Action::ListDown => {
                let len = self.active_list_len();
                if let Some(list) = self.active_list_mut() {
                    list.select_next(len);
                    list.update_scroll(20);
                }
            }
            Action::GoTop => {
                if let Some(list) = self.active_list_mut() {
                    list.selected = 0;
                    list.scroll_offset = 0;
                }
            }
            Action::GoBottom => {
                let len = self.active_list_len();
                if let Some(list) = self.active_list_mut() {
                    list.select_last(len);
                    list.update_scroll(20);
                }
            }
            Action::FocusChannel(channel) => self.state.channel = channel,
            Action::ChannelNext => self.state.channel = self.state.channel.next(),
            Action::InputChar(c) => {
                if let Some(p) = self.state.prompt.as_mut() {
                    p.input.push(c);
                }
            }
            Action::Backspace => {
                if let Some(p) = self.state.prompt.as_mut() {
                    p.input.pop();
                }
            }
            Action::ClearInput => {
                if let Some(p) = self.state.prompt.as_mut() {
                    p.input.clear();
                }
            }
            Action::CancelPrompt => self.state.prompt = None,
            Action::Resize => {}
            // side-effecting actions go through handle_action
            Action::Activate
            | Action::AdjustChannel(_)
            | Action::TogglePicking
            | Action::OpenPrompt(_)
            | Action::SubmitPrompt
            | Action::AddFavorite
            | Action::RemoveFavorite
            | Action::CopyInfo
            | Action::CopyFormat(_)
            | Action::CopyName => {}
        }
    }

    fn active_list_mut(&mut self) -> Option<&mut state::ListCursor> {
        match self.state.screen {
            Screen::Recent => Some(&mut self.state.recent_list),
            Screen::Favorites => Some(&mut self.state.favorites_list),
            Screen::Picker | Screen::Names | Screen::Help => None,
        }
    }

    fn active_list_len(&self) -> usize {
        match self.state.screen {
            Screen::Recent => self.state.recent.len(),
            Screen::Favorites => self.state.favorites.len(),
            Screen::Picker | Screen::Names | Screen::Help => 0,
        }
    }

    fn prompt_default(&self, kind: PromptKind) -> String {
        match kind {
            PromptKind::Hex => self.state.current.to_hex(),
            PromptKind::ImportFavorites | PromptKind::ExportFavorites => self
                .cfg
                .paths
                .data_dir
                .join("favorites.json")
                .display()
                .to_string(),
            PromptKind::SaveSwatch => {
                let hex = self.state.current.to_hex();
                let name = self
                    .state
                    .primary_name()
                    .unwrap_or_else(|| hex.trim_start_matches('#'));
                output::suggested_swatch_name(name)
            }
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) {
        let input = prompt.input.trim();
        if input.is_empty() {
            return;
        }
        match prompt.kind {
            PromptKind::Hex => match input.parse::<Rgb>() {
                Ok(rgb) => {
                    self.stop_picking();
                    self.select_color(rgb);
                }
                Err(e) => self.state.toast = Some(Toast::error(format!("{e:#}"))),
            },
            PromptKind::ImportFavorites => {
                let path = expand_path(input);
                match self.state.favorites.import_file(&path) {
                    Ok(n) => {
                        self.state.favorites_list = state::ListCursor::default();
                        self.settings.save_favorites(&self.state.favorites);
                        self.state.toast = Some(Toast::success(format!("Imported {n} favorites")));
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "favorites import failed");
                        self.state.toast = Some(Toast::error(format!("Import failed: {e:#}")));
                    }
                }
            }
            PromptKind::ExportFavorites => {
                let path = expand_path(input);
                self.state.toast = Some(match self.state.favorites.export_file(&path) {
                    Ok(n) => Toast::success(format!("Exported {n} favorites to {}", path.display())),
                    Err(e) => Toast::error(format!("Export failed: {e:#}")),
                });
            }
            PromptKind::SaveSwatch => {
                let path = expand_path(input);
                self.state.toast = Some(match output::save_swatch(&path, self.state.current) {
                    Ok(()) => Toast::success(format!("Saved {}", path.display())),
                    Err(e) => Toast::error(format!("Save failed: {e:#}")),
                });
            }
        }
    }

    fn add_favorite(&mut self) {
        let rgb = self.state.current;
        let name = self
            .state
            .primary_name()
            .map(str::to_string)
            .unwrap_or_else(|| rgb.to_hex());
        if self.state.favorites.add(FavoriteEntry::new(rgb, name.clone())) {
            self.settings.save_favorites(&self.state.favorites);
            self.state.toast = Some(Toast::success(format!("Added {name} to favorites")));
        } else {
            self.state.toast = Some(Toast::info(format!("{} is already a favorite", rgb.to_hex())));
        }
    }

    async fn copy(&mut self, text: &str, what: &str) {
        self.state.toast = Some(
            match output::copy_to_clipboard(&self.cfg.clipboard.command, text).await {
                Ok(()) => Toast::success(format!("Copied {what}")),
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "clipboard copy failed");
                    Toast::error(format!("Copy failed: {e:#}"))
                }
            },
        );
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_path(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/")
        && let Some(dirs) = directories::BaseDirs::new()
    {
        return dirs.home_dir().join(rest);
    }
    PathBuf::from(input)
}
