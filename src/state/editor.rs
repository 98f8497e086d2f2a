use serde_json::Value;

use super::param::{Color, Model, ParamId, ParamValue, Parameter};
use super::validate::{validate_model, ValidationError};

/// Outcome of the pre-render guards, checked in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStatus {
    NoParams,
    InvalidModel(ValidationError),
    Editing,
}

/// Edit session for one parameter list and the externally supplied model.
///
/// The external model is authoritative: every `replace_model` call resets the
/// edit state wholesale, even when nothing changed, discarding unsaved edits.
pub struct ParamEditor {
    params: Vec<Parameter>,
    candidate: Value,
    status: EditorStatus,
    colors: Vec<Color>,
    edits: Vec<ParamValue>,
}

impl ParamEditor {
    pub fn new(params: Vec<Parameter>, candidate: Value) -> Self {
        let mut editor = Self {
            params,
            candidate: Value::Null,
            status: EditorStatus::NoParams,
            colors: Vec::new(),
            edits: Vec::new(),
        };
        editor.replace_model(candidate);
        editor
    }

    pub fn status(&self) -> &EditorStatus {
        &self.status
    }

    pub fn is_editing(&self) -> bool {
        self.status == EditorStatus::Editing
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Take a new external model. Edit state is replaced whenever it validates.
    pub fn replace_model(&mut self, candidate: Value) {
        self.candidate = candidate;
        self.status = self.check_guards(true);
    }

    /// Take a new parameter list. Edits survive if the session stays valid.
    pub fn set_params(&mut self, params: Vec<Parameter>) {
        self.params = params;
        let reseed = !self.is_editing();
        self.status = self.check_guards(reseed);
    }

    fn check_guards(&mut self, reseed: bool) -> EditorStatus {
        if self.params.is_empty() {
            return EditorStatus::NoParams;
        }
        match validate_model(&self.candidate, &self.params) {
            Ok(model) => {
                if reseed {
                    self.edits = model.param_values;
                    self.colors = model.colors;
                }
                EditorStatus::Editing
            }
            Err(e) => {
                log::warn!("rejected model: {}", e);
                EditorStatus::InvalidModel(e)
            }
        }
    }

    /// Replace the value of an existing entry. Returns false (and changes
    /// nothing) when the id has no entry: entries are never inserted here.
    pub fn set_value(&mut self, param_id: ParamId, new_value: &str) -> bool {
        if !self.is_editing() {
            return false;
        }
        match self.edits.iter_mut().find(|pv| pv.param_id == param_id) {
            Some(entry) => {
                entry.value = new_value.to_string();
                true
            }
            None => {
                log::debug!("ignoring edit for param {} with no current value", param_id);
                false
            }
        }
    }

    /// Snapshot of the edited model, `None` while a guard is showing
    pub fn get_model(&self) -> Option<Model> {
        if !self.is_editing() {
            return None;
        }
        Some(Model {
            param_values: self.edits.clone(),
            colors: self.colors.clone(),
        })
    }

    pub fn value_of(&self, param_id: ParamId) -> &str {
        self.edits
            .iter()
            .find(|pv| pv.param_id == param_id)
            .map(|pv| pv.value.as_str())
            .unwrap_or("")
    }

    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Parameters in list order paired with their current values
    pub fn fields(&self) -> impl Iterator<Item = (&Parameter, &str)> + '_ {
        self.params.iter().map(move |p| (p, self.value_of(p.id)))
    }
}
