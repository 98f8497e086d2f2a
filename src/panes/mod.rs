mod help_pane;
mod param_editor_pane;

pub use help_pane::HelpPane;
pub use param_editor_pane::ParamEditorPane;
