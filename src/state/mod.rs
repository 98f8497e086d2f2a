pub mod editor;
pub mod param;
pub mod validate;

pub use editor::{EditorStatus, ParamEditor};
pub use param::{Color, Model, ParamId, ParamType, ParamValue, Parameter};
#[cfg(test)]
pub use validate::is_valid_model;
pub use validate::{validate_model, ValidationError};

use crate::source::ModelSource;

/// Top-level application state, owned by main.rs and passed to panes by reference.
pub struct AppState {
    pub editor: ParamEditor,
    pub source: ModelSource,
    /// Most recent snapshot handed to the emit sink
    pub last_emitted: Option<Model>,
}

impl AppState {
    pub fn new(source: ModelSource, params: Vec<Parameter>, model: serde_json::Value) -> Self {
        Self {
            editor: ParamEditor::new(params, model),
            source,
            last_emitted: None,
        }
    }

    /// Load params and model from the source and open an edit session
    pub fn load(source: ModelSource) -> Result<Self, crate::source::LoadError> {
        let params = source.load_params()?;
        let model = source.load_model()?;
        Ok(Self::new(source, params, model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_demo_state() {
        let state = AppState::load(ModelSource::Demo).unwrap();
        assert!(state.editor.is_editing());
        assert_eq!(state.editor.params().len(), 2);
        assert!(state.last_emitted.is_none());
    }
}
