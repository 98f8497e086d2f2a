use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as RatatuiRect;

use crate::state::{ParamType, Parameter};
use crate::ui::widgets::TextInput;
use crate::ui::InputEvent;

/// What a field needs to draw itself
pub struct FieldView<'a> {
    pub param: &'a Parameter,
    pub value: &'a str,
    /// Cursor position when the field has focus
    pub cursor: Option<usize>,
}

/// Result of feeding a key to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Ignored,
    Consumed,
    /// The value changed; carries the full new value
    Changed(String),
}

/// Renders and edits one parameter value of a given type
pub trait FieldRenderer {
    fn render(&self, field: FieldView<'_>, area: RatatuiRect, buf: &mut Buffer);

    fn handle_input(&self, input: &mut TextInput, event: &InputEvent) -> FieldInput;
}

/// Single-line text control for `"string"` parameters
pub struct StringField;

impl FieldRenderer for StringField {
    fn render(&self, field: FieldView<'_>, area: RatatuiRect, buf: &mut Buffer) {
        debug_assert_eq!(field.param.param_type, ParamType::String);
        TextInput::render_value(field.value, field.cursor, area, buf);
    }

    fn handle_input(&self, input: &mut TextInput, event: &InputEvent) -> FieldInput {
        let before = input.value().to_string();
        if !input.handle_input(event) {
            return FieldInput::Ignored;
        }
        if input.value() == before {
            FieldInput::Consumed
        } else {
            FieldInput::Changed(input.value().to_string())
        }
    }
}

/// Maps parameter type tags to renderers
pub struct FieldRegistry {
    renderers: HashMap<String, Box<dyn FieldRenderer>>,
    reported: RefCell<HashSet<String>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            renderers: HashMap::new(),
            reported: RefCell::new(HashSet::new()),
        };
        registry.register(&ParamType::String, Box::new(StringField));
        registry
    }

    pub fn register(&mut self, param_type: &ParamType, renderer: Box<dyn FieldRenderer>) {
        self.renderers.insert(param_type.tag().to_string(), renderer);
    }

    pub fn supports(&self, param_type: &ParamType) -> bool {
        self.renderers.contains_key(param_type.tag())
    }

    /// Find the renderer for a parameter. Unknown types are reported once
    /// per tag on the error log and yield `None`.
    pub fn resolve(&self, param: &Parameter) -> Option<&dyn FieldRenderer> {
        let tag = param.param_type.tag();
        match self.renderers.get(tag) {
            Some(renderer) => Some(renderer.as_ref()),
            None => {
                if self.reported.borrow_mut().insert(tag.to_string()) {
                    log::error!(
                        "unsupported parameter type `{}` (parameter {} \"{}\")",
                        tag,
                        param.id,
                        param.name
                    );
                }
                None
            }
        }
    }

    #[cfg(test)]
    pub fn reported_types(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.reported.borrow().iter().cloned().collect();
        tags.sort();
        tags
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}
