//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

#[derive(Debug, Clone)]
pub struct Icons {
    // Screens
    pub picker: &'static str,
    pub names: &'static str,
    pub recent: &'static str,
    pub favorite: &'static str,
    pub help: &'static str,

    // Status
    pub success: &'static str,
    pub error: &'static str,
    pub info: &'static str,
    pub picking: &'static str,

    // Selection
    pub selected: &'static str,
    pub unselected: &'static str,

    // Channel bars
    pub bar_full: &'static str,
    pub bar_empty: &'static str,

    pub swatch: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            picker: "\u{f1fb}",    // nf-fa-eyedropper
            names: "\u{f02b}",     // nf-fa-tag
            recent: "\u{f1da}",    // nf-fa-history
            favorite: "\u{f004}",  // nf-fa-heart
            help: "\u{f059}",      // nf-fa-question_circle

            success: "\u{f00c}",   // nf-fa-check
            error: "\u{f00d}",     // nf-fa-times
            info: "\u{f05a}",      // nf-fa-info_circle
            picking: "\u{f111}",   // nf-fa-circle

            selected: "\u{f054}",  // nf-fa-chevron_right
            unselected: " ",

            bar_full: "━",
            bar_empty: "─",

            swatch: "██",
        }
    }

    pub fn screen(&self, screen: crate::app::state::Screen) -> &'static str {
        use crate::app::state::Screen;
        match screen {
            Screen::Picker => self.picker,
            Screen::Names => self.names,
            Screen::Recent => self.recent,
            Screen::Favorites => self.favorite,
            Screen::Help => self.help,
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}
