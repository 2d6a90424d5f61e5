use crate::color::Rgb;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    /// A color read by the pick task.
    Sample(Rgb),
    /// The pick task failed and stopped.
    SampleError(String),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}
