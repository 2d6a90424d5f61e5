use super::state::{PromptKind, Screen};
use crate::color::Channel;
use crate::color::formats::Format;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextScreen,
    PrevScreen,
    SetScreen(Screen),

    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    /// Select the highlighted recent/favorite color.
    Activate,

    // Manual chooser
    FocusChannel(Channel),
    ChannelNext,
    AdjustChannel(i16),

    TogglePicking,

    // Prompt line editing
    OpenPrompt(PromptKind),
    InputChar(char),
    Backspace,
    ClearInput,
    SubmitPrompt,
    CancelPrompt,

    AddFavorite,
    RemoveFavorite,

    CopyInfo,
    CopyFormat(Format),
    CopyName,

    Resize,
}
