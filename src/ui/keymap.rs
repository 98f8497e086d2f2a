use super::{InputEvent, KeyCode};

/// Pattern for matching key inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPattern {
    /// Special key (arrows, function keys, etc.)
    Key(KeyCode),
    /// Ctrl + character
    Ctrl(char),
}

impl KeyPattern {
    /// Check if this pattern matches an input event
    pub fn matches(&self, event: &InputEvent) -> bool {
        match self {
            KeyPattern::Key(code) => {
                event.key == *code && !event.modifiers.ctrl && !event.modifiers.alt
            }
            KeyPattern::Ctrl(ch) => {
                matches!(event.key, KeyCode::Char(c) if c == *ch) && event.modifiers.ctrl
            }
        }
    }

    /// Get a display string for this key pattern (for help screens)
    pub fn display(&self) -> String {
        match self {
            KeyPattern::Key(code) => match code {
                KeyCode::Char(ch) => ch.to_string(),
                KeyCode::F(n) => format!("F{}", n),
                other => format!("{:?}", other),
            },
            KeyPattern::Ctrl(ch) => format!("Ctrl+{}", ch),
        }
    }
}

/// A single key binding
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub pattern: KeyPattern,
    pub action: &'static str,
    pub description: &'static str,
}

/// A collection of key bindings for a pane.
///
/// Plain characters are never bound: they belong to the focused text field.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    /// Create a new empty keymap
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add a special key binding
    pub fn bind_key(
        mut self,
        key: KeyCode,
        action: &'static str,
        description: &'static str,
    ) -> Self {
        self.bindings.push(KeyBinding {
            pattern: KeyPattern::Key(key),
            action,
            description,
        });
        self
    }

    /// Add a Ctrl+char binding
    pub fn bind_ctrl(mut self, ch: char, action: &'static str, description: &'static str) -> Self {
        self.bindings.push(KeyBinding {
            pattern: KeyPattern::Ctrl(ch),
            action,
            description,
        });
        self
    }

    /// Look up the action for an input event
    pub fn lookup(&self, event: &InputEvent) -> Option<&'static str> {
        self.bindings
            .iter()
            .find(|b| b.pattern.matches(event))
            .map(|b| b.action)
    }

    /// Get all bindings (for help screens)
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }
}
