use crate::color::tables::TableSource;
use crate::color::{Channel, ColorFormats, Database, NameHit, Rgb};
use crate::favorites::Favorites;
use crate::recent::RecentColors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Picker,
    Names,
    Recent,
    Favorites,
    Help,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Picker,
        Screen::Names,
        Screen::Recent,
        Screen::Favorites,
        Screen::Help,
    ];

    pub fn next(self) -> Self {
        match self {
            Screen::Picker => Screen::Names,
            Screen::Names => Screen::Recent,
            Screen::Recent => Screen::Favorites,
            Screen::Favorites => Screen::Help,
            Screen::Help => Screen::Picker,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Picker => Screen::Help,
            Screen::Names => Screen::Picker,
            Screen::Recent => Screen::Names,
            Screen::Favorites => Screen::Recent,
            Screen::Help => Screen::Favorites,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Screen::Picker => 0,
            Screen::Names => 1,
            Screen::Recent => 2,
            Screen::Favorites => 3,
            Screen::Help => 4,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        Self::ALL.get(idx).copied().unwrap_or(Screen::Help)
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Picker => "Picker",
            Screen::Names => "Names",
            Screen::Recent => "Recent",
            Screen::Favorites => "Favorites",
            Screen::Help => "Help",
        }
    }

    /// Name stored in the settings database.
    pub fn key(self) -> &'static str {
        match self {
            Screen::Picker => "picker",
            Screen::Names => "names",
            Screen::Recent => "recent",
            Screen::Favorites => "favorites",
            Screen::Help => "help",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// What a line-input prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Hex,
    ImportFavorites,
    ExportFavorites,
    SaveSwatch,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Hex => "Color (#RRGGBB or r,g,b)",
            PromptKind::ImportFavorites => "Import favorites from",
            PromptKind::ExportFavorites => "Export favorites to",
            PromptKind::SaveSwatch => "Save swatch to",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub fn new(kind: PromptKind, initial: impl Into<String>) -> Self {
        Self {
            kind,
            input: initial.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Error)
    }

    fn with_kind(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// Cursor into a list whose items live elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ListCursor {
    pub selected: usize,
    pub scroll_offset: usize,
}

impl ListCursor {
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Keep `selected` valid after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        self.scroll_offset = self.scroll_offset.min(self.selected);
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }
}

pub struct AppState {
    pub should_quit: bool,

    pub screen: Screen,

    // Current color and everything derived from it
    pub current: Rgb,
    pub formats: ColorFormats,
    pub names: Vec<NameHit>,

    // Manual chooser
    pub channel: Channel,

    pub picking: bool,

    pub recent: RecentColors,
    pub recent_list: ListCursor,
    pub favorites: Favorites,
    pub favorites_list: ListCursor,

    pub table_summary: Vec<(Database, usize, TableSource)>,

    pub prompt: Option<Prompt>,
    pub toast: Option<Toast>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            screen: Screen::Picker,
            current: Rgb::WHITE,
            formats: ColorFormats::from_rgb(Rgb::WHITE),
            names: Vec::new(),
            channel: Channel::default(),
            picking: false,
            recent: RecentColors::new(),
            recent_list: ListCursor::default(),
            favorites: Favorites::new(),
            favorites_list: ListCursor::default(),
            table_summary: Vec::new(),
            prompt: None,
            toast: None,
        }
    }

    /// Replace the current color and its derived data.
    pub fn show_color(&mut self, rgb: Rgb, names: Vec<NameHit>) {
        self.current = rgb;
        self.formats = ColorFormats::from_rgb(rgb);
        self.names = names;
    }

    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(NameHit::name)
    }

    pub fn selected_recent(&self) -> Option<Rgb> {
        self.recent.get(self.recent_list.selected)
    }

    pub fn selected_favorite_rgb(&self) -> Option<Rgb> {
        self.favorites.get(self.favorites_list.selected).map(|f| f.rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_cycle() {
        let mut s = Screen::Picker;
        for _ in 0..Screen::ALL.len() {
            s = s.next();
        }
        assert_eq!(s, Screen::Picker);
        assert_eq!(Screen::Picker.prev(), Screen::Help);
        for screen in Screen::ALL {
            assert_eq!(screen.next().prev(), screen);
            assert_eq!(Screen::from_index(screen.index()), screen);
            assert_eq!(Screen::from_key(screen.key()), Some(screen));
        }
        assert_eq!(Screen::from_key("bogus"), None);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut c = ListCursor::default();
        c.select_prev();
        assert_eq!(c.selected, 0);
        c.select_next(3);
        c.select_next(3);
        c.select_next(3);
        assert_eq!(c.selected, 2);
        c.clamp(1);
        assert_eq!(c.selected, 0);
        c.select_next(0);
        assert_eq!(c.selected, 0);
    }

    #[test]
    fn test_cursor_scroll() {
        let mut c = ListCursor::default();
        c.selected = 7;
        c.update_scroll(5);
        assert_eq!(c.scroll_offset, 3);
        c.selected = 1;
        c.update_scroll(5);
        assert_eq!(c.scroll_offset, 1);
    }
}
