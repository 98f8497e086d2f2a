pub mod field;
pub mod frame;
pub mod input;
pub mod keymap;
pub mod layout_helpers;
pub mod pane;
pub mod ratatui_impl;
pub mod style;
pub mod widgets;

pub use field::{FieldInput, FieldRegistry, FieldRenderer, FieldView};
pub use frame::Frame;
pub use input::{InputEvent, InputSource, KeyCode, Modifiers};
pub use keymap::Keymap;
pub use pane::{Action, EditorAction, NavAction, Pane, PaneManager, SessionAction};
pub use ratatui_impl::RatatuiBackend;
pub use style::{Color, Style};
