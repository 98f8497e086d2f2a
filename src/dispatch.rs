use crate::panes::ParamEditorPane;
use crate::state::{AppState, EditorStatus};
use crate::ui::{Action, EditorAction, Frame, PaneManager, SessionAction};

/// Dispatch an action. Returns true if the app should quit.
pub fn dispatch_action(
    action: &Action,
    state: &mut AppState,
    panes: &mut PaneManager,
    app_frame: &mut Frame,
) -> bool {
    match action {
        Action::Quit => return true,
        Action::Nav(_) => {} // Handled by PaneManager
        Action::Editor(a) => dispatch_editor(a, state, app_frame),
        Action::Session(a) => dispatch_session(a, state, panes, app_frame),
        Action::None => {}
    }
    false
}

fn dispatch_editor(action: &EditorAction, state: &mut AppState, app_frame: &mut Frame) {
    match action {
        EditorAction::SetValue(param_id, value) => {
            state.editor.set_value(*param_id, value);
        }
        EditorAction::Emit => emit_model(state, app_frame),
    }
}

/// Hand the current snapshot to the sink: console, log, and the value
/// printed on exit
fn emit_model(state: &mut AppState, app_frame: &mut Frame) {
    let Some(model) = state.editor.get_model() else {
        return;
    };
    match model.to_json(false) {
        Ok(json) => {
            log::info!("emitted model: {}", json);
            app_frame.push_message(json);
            state.last_emitted = Some(model);
        }
        Err(e) => {
            log::error!("cannot serialize model: {}", e);
            app_frame.push_message(format!("Emit failed: {}", e));
        }
    }
}

fn dispatch_session(
    action: &SessionAction,
    state: &mut AppState,
    panes: &mut PaneManager,
    app_frame: &mut Frame,
) {
    match action {
        SessionAction::ReloadModel => match state.source.load_model() {
            Ok(model) => {
                state.editor.replace_model(model);
                log::info!(
                    "model reloaded from {} ({} values)",
                    state.source.label(),
                    state.editor.edit_count()
                );
                app_frame.push_message(status_message("Model reloaded", state.editor.status()));
            }
            Err(e) => {
                log::error!("{}", e);
                app_frame.push_message(format!("Reload failed: {}", e));
            }
        },
        SessionAction::ReloadParams => match state.source.load_params() {
            Ok(params) => {
                let count = params.len();
                state.editor.set_params(params);
                log::info!("{} parameters reloaded from {}", count, state.source.label());
                app_frame.push_message(status_message(
                    &format!("{} parameters loaded", count),
                    state.editor.status(),
                ));
            }
            Err(e) => {
                log::error!("{}", e);
                app_frame.push_message(format!("Reload failed: {}", e));
            }
        },
    }
    if let Some(editor) = panes.get_pane_mut::<ParamEditorPane>("param_editor") {
        editor.reset_input();
    }
}

fn status_message(prefix: &str, status: &EditorStatus) -> String {
    match status {
        EditorStatus::Editing => prefix.to_string(),
        EditorStatus::NoParams => format!("{} (no parameters)", prefix),
        EditorStatus::InvalidModel(e) => format!("{} (invalid: {})", prefix, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ModelSource;
    use crate::state::{Color, ParamValue};
    use std::io::Write;

    fn setup(source: ModelSource) -> (AppState, PaneManager, Frame) {
        let state = AppState::load(source).unwrap();
        let panes = PaneManager::new(Box::new(ParamEditorPane::default()));
        (state, panes, Frame::new())
    }

    #[test]
    fn test_set_value_and_emit() {
        let (mut state, mut panes, mut frame) = setup(ModelSource::Demo);
        let set = Action::Editor(EditorAction::SetValue(1, "formal".to_string()));
        assert!(!dispatch_action(&set, &mut state, &mut panes, &mut frame));
        dispatch_action(&Action::Editor(EditorAction::Emit), &mut state, &mut panes, &mut frame);

        let emitted = state.last_emitted.clone().unwrap();
        assert_eq!(
            emitted.param_values,
            vec![ParamValue::new(1, "formal"), ParamValue::new(2, "maxi")]
        );
        assert_eq!(
            frame.messages().last(),
            Some(r#"{"paramValues":[{"paramId":1,"value":"formal"},{"paramId":2,"value":"maxi"}],"colors":[]}"#)
        );
    }

    #[test]
    fn test_emit_in_guard_state_does_nothing() {
        let mut state = AppState::new(ModelSource::Demo, Vec::new(), serde_json::json!({}));
        let mut panes = PaneManager::new(Box::new(ParamEditorPane::default()));
        let mut frame = Frame::new();
        dispatch_action(&Action::Editor(EditorAction::Emit), &mut state, &mut panes, &mut frame);
        assert!(state.last_emitted.is_none());
        assert_eq!(frame.messages().count(), 0);
    }

    #[test]
    fn test_quit() {
        let (mut state, mut panes, mut frame) = setup(ModelSource::Demo);
        assert!(dispatch_action(&Action::Quit, &mut state, &mut panes, &mut frame));
    }

    #[test]
    fn test_reload_model_discards_edits_and_takes_colors() {
        let dir = tempfile::tempdir().unwrap();
        let params_path = dir.path().join("params.json");
        let model_path = dir.path().join("model.json");
        std::fs::write(
            &params_path,
            r#"[{"id": 1, "name": "Purpose", "type": "string"}]"#,
        )
        .unwrap();
        std::fs::write(
            &model_path,
            r#"{"paramValues": [{"paramId": 1, "value": "casual"}], "colors": []}"#,
        )
        .unwrap();

        let (mut state, mut panes, mut frame) = setup(ModelSource::Files {
            params: params_path,
            model: model_path.clone(),
        });
        let set = Action::Editor(EditorAction::SetValue(1, "formal".to_string()));
        dispatch_action(&set, &mut state, &mut panes, &mut frame);
        assert_eq!(state.editor.value_of(1), "formal");

        let mut file = std::fs::File::create(&model_path).unwrap();
        file.write_all(
            br#"{"paramValues": [{"paramId": 1, "value": "sport"}], "colors": [{"id": 2, "value": "red"}]}"#,
        )
        .unwrap();
        drop(file);

        let reload = Action::Session(SessionAction::ReloadModel);
        dispatch_action(&reload, &mut state, &mut panes, &mut frame);
        let model = state.editor.get_model().unwrap();
        assert_eq!(model.param_values, vec![ParamValue::new(1, "sport")]);
        assert_eq!(model.colors, vec![Color::new(2, "red")]);
        assert_eq!(frame.messages().last(), Some("Model reloaded"));
    }

    #[test]
    fn test_reload_failure_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let params_path = dir.path().join("params.json");
        let model_path = dir.path().join("model.json");
        std::fs::write(&params_path, r#"[{"id": 1, "name": "Purpose", "type": "string"}]"#).unwrap();
        std::fs::write(
            &model_path,
            r#"{"paramValues": [{"paramId": 1, "value": "casual"}], "colors": []}"#,
        )
        .unwrap();
        let (mut state, mut panes, mut frame) = setup(ModelSource::Files {
            params: params_path,
            model: model_path.clone(),
        });
        dispatch_action(
            &Action::Editor(EditorAction::SetValue(1, "formal".to_string())),
            &mut state,
            &mut panes,
            &mut frame,
        );

        std::fs::remove_file(&model_path).unwrap();
        dispatch_action(&Action::Session(SessionAction::ReloadModel), &mut state, &mut panes, &mut frame);
        assert_eq!(state.editor.value_of(1), "formal");
        assert!(frame.messages().last().unwrap().starts_with("Reload failed"));
    }

    #[test]
    fn test_reload_demo_model_resets_edits() {
        let (mut state, mut panes, mut frame) = setup(ModelSource::Demo);
        dispatch_action(
            &Action::Editor(EditorAction::SetValue(2, "mini".to_string())),
            &mut state,
            &mut panes,
            &mut frame,
        );
        dispatch_action(&Action::Session(SessionAction::ReloadModel), &mut state, &mut panes, &mut frame);
        assert_eq!(state.editor.value_of(2), "maxi");
    }

    #[test]
    fn test_reload_params_reports_invalid_model() {
        let dir = tempfile::tempdir().unwrap();
        let params_path = dir.path().join("params.json");
        let model_path = dir.path().join("model.json");
        std::fs::write(&params_path, r#"[{"id": 1, "name": "Purpose", "type": "string"}]"#).unwrap();
        std::fs::write(
            &model_path,
            r#"{"paramValues": [{"paramId": 1, "value": "casual"}], "colors": []}"#,
        )
        .unwrap();
        let (mut state, mut panes, mut frame) = setup(ModelSource::Files {
            params: params_path.clone(),
            model: model_path,
        });

        std::fs::write(&params_path, r#"[{"id": 5, "name": "Other", "type": "string"}]"#).unwrap();
        dispatch_action(&Action::Session(SessionAction::ReloadParams), &mut state, &mut panes, &mut frame);
        assert!(matches!(state.editor.status(), EditorStatus::InvalidModel(_)));
        assert!(frame.messages().last().unwrap().starts_with("1 parameters loaded (invalid"));
    }
}
