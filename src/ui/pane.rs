use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as RatatuiRect;

use super::{InputEvent, Keymap};
use crate::state::{AppState, ParamId};

/// Navigation between panes, handled by the PaneManager
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    /// Push a pane on top of the current one (overlays)
    PushPane(&'static str),
    /// Return to the pane underneath
    PopPane,
}

/// Edits to the parameter editor session
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Full new value for one parameter
    SetValue(ParamId, String),
    /// Hand the current model snapshot to the sink
    Emit,
}

/// Re-read inputs from the model source
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    ReloadModel,
    ReloadParams,
}

/// Actions that can be returned from pane input handling
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,
    Nav(NavAction),
    Editor(EditorAction),
    Session(SessionAction),
}

/// Trait for UI panes (screens/views)
pub trait Pane {
    /// Unique identifier for this pane
    fn id(&self) -> &'static str;

    /// Handle an input event, returning an action
    fn handle_input(&mut self, event: InputEvent, state: &AppState) -> Action;

    /// Render the pane into the given area
    fn render(&self, area: RatatuiRect, buf: &mut Buffer, state: &AppState);

    /// Get the keymap for this pane (for introspection/help)
    fn keymap(&self) -> &Keymap;

    /// Called when this pane becomes active
    fn on_enter(&mut self, _state: &AppState) {}

    /// Whether the pane underneath stays visible while this one is on top
    fn is_overlay(&self) -> bool {
        false
    }

    /// Return self as Any for downcasting (required for type-specific access)
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Manages a stack of panes with one active pane
pub struct PaneManager {
    panes: Vec<Box<dyn Pane>>,
    stack: Vec<usize>,
    active_index: usize,
}

impl PaneManager {
    /// Create a new pane manager with an initial pane
    pub fn new(initial_pane: Box<dyn Pane>) -> Self {
        Self {
            panes: vec![initial_pane],
            stack: Vec::new(),
            active_index: 0,
        }
    }

    /// Add a pane to the manager (does not make it active)
    pub fn add_pane(&mut self, pane: Box<dyn Pane>) {
        self.panes.push(pane);
    }

    pub fn active(&self) -> &dyn Pane {
        self.panes[self.active_index].as_ref()
    }

    pub fn active_mut(&mut self) -> &mut dyn Pane {
        self.panes[self.active_index].as_mut()
    }

    /// Push a pane by ID, remembering the current one
    pub fn push_to(&mut self, id: &str, state: &AppState) -> bool {
        match self.panes.iter().position(|p| p.id() == id) {
            Some(index) if index != self.active_index => {
                self.stack.push(self.active_index);
                self.active_index = index;
                self.panes[index].on_enter(state);
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Pop back to the previous pane
    pub fn pop(&mut self, state: &AppState) -> bool {
        match self.stack.pop() {
            Some(index) => {
                self.active_index = index;
                self.panes[index].on_enter(state);
                true
            }
            None => false,
        }
    }

    /// Handle input for the active pane and process navigation actions
    pub fn handle_input(&mut self, event: InputEvent, state: &AppState) -> Action {
        let action = self.active_mut().handle_input(event, state);

        if let Action::Nav(nav) = &action {
            match nav {
                NavAction::PushPane(id) => {
                    self.push_to(id, state);
                }
                NavAction::PopPane => {
                    self.pop(state);
                }
            }
        }

        action
    }

    /// Render the active pane, with whatever it covers underneath if it is an overlay
    pub fn render(&self, area: RatatuiRect, buf: &mut Buffer, state: &AppState) {
        if self.active().is_overlay() {
            if let Some(&below) = self.stack.last() {
                self.panes[below].render(area, buf, state);
            }
        }
        self.active().render(area, buf, state);
    }

    /// Get a mutable reference to a pane by ID, downcasted to a specific type
    pub fn get_pane_mut<T: 'static>(&mut self, id: &str) -> Option<&mut T> {
        self.panes
            .iter_mut()
            .find(|p| p.id() == id)
            .and_then(|p| p.as_any_mut().downcast_mut::<T>())
    }
}
