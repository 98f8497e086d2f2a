use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as RatatuiRect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::config::EditorTexts;
use crate::state::{AppState, EditorStatus, ParamId};
use crate::ui::layout_helpers::text_width;
use crate::ui::widgets::TextInput;
use crate::ui::{
    Action, Color, EditorAction, FieldInput, FieldRegistry, FieldView, InputEvent, KeyCode,
    Keymap, Pane, SessionAction, Style,
};

const FIELD_WIDTH: u16 = 32;
const COLUMN_GAP: u16 = 2;

/// One-row rect from `x` to the right edge of `area`
fn row_rect(area: RatatuiRect, x: u16, y: u16) -> RatatuiRect {
    RatatuiRect::new(x, y, (area.x + area.width).saturating_sub(x), 1)
}

/// Something that can hold keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    /// Index into the parameter list
    Field(usize),
    Emit,
}

pub struct ParamEditorPane {
    keymap: Keymap,
    texts: EditorTexts,
    registry: FieldRegistry,
    focus: usize,
    input: TextInput,
    /// Parameter the text input currently mirrors
    input_param: Option<ParamId>,
}

impl ParamEditorPane {
    pub fn new(texts: EditorTexts) -> Self {
        Self {
            keymap: Keymap::new()
                .bind_key(KeyCode::Down, "next", "Next field")
                .bind_key(KeyCode::Tab, "next", "Next field")
                .bind_key(KeyCode::Up, "prev", "Previous field")
                .bind_key(KeyCode::BackTab, "prev", "Previous field")
                .bind_key(KeyCode::Enter, "activate", "Next field / press button")
                .bind_ctrl('e', "emit", "Print model to console")
                .bind_ctrl('r', "reload_model", "Reload model from source")
                .bind_ctrl('p', "reload_params", "Reload parameters from source"),
            texts,
            registry: FieldRegistry::new(),
            focus: 0,
            input: TextInput::new(),
            input_param: None,
        }
    }

    /// Editable fields in list order, then the emit button
    fn targets(&self, state: &AppState) -> Vec<Focus> {
        let mut targets: Vec<Focus> = state
            .editor
            .params()
            .iter()
            .enumerate()
            .filter(|(_, p)| self.registry.supports(&p.param_type))
            .map(|(i, _)| Focus::Field(i))
            .collect();
        targets.push(Focus::Emit);
        targets
    }

    fn current(&self, targets: &[Focus]) -> Focus {
        targets
            .get(self.focus.min(targets.len().saturating_sub(1)))
            .copied()
            .unwrap_or(Focus::Emit)
    }

    fn move_focus(&mut self, len: usize, forward: bool) {
        if len == 0 {
            return;
        }
        let focus = self.focus.min(len - 1);
        self.focus = if forward {
            (focus + 1) % len
        } else if focus == 0 {
            len - 1
        } else {
            focus - 1
        };
    }

    /// Mirror the editor's value into the text input if it drifted (focus
    /// change or an external model reset)
    fn sync_input(&mut self, param_id: ParamId, value: &str) {
        if self.input_param != Some(param_id) || self.input.value() != value {
            self.input.set_value(value);
            self.input_param = Some(param_id);
        }
    }

    /// Forget the text input state; the next keystroke re-reads the value
    /// from the editor with the cursor at the end
    pub fn reset_input(&mut self) {
        self.input_param = None;
    }

    fn cursor_for(&self, param_id: ParamId, value: &str) -> usize {
        if self.input_param == Some(param_id) && self.input.value() == value {
            self.input.cursor()
        } else {
            value.chars().count()
        }
    }

    fn render_message(&self, area: RatatuiRect, buf: &mut Buffer, lines: Vec<Line<'_>>) {
        let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
        for (i, line) in lines.into_iter().enumerate() {
            let y = top + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let x = area.x + area.width.saturating_sub(line.width() as u16) / 2;
            Paragraph::new(line).render(row_rect(area, x, y), buf);
        }
    }

    fn render_editor(&self, area: RatatuiRect, buf: &mut Buffer, state: &AppState) {
        let editor = &state.editor;
        let targets = self.targets(state);
        let focused = self.current(&targets);

        // Title
        let title_style = ratatui::style::Style::from(Style::new().fg(Color::ORANGE).bold());
        let title_x = area.x + area.width.saturating_sub(text_width(&self.texts.title)) / 2;
        Paragraph::new(Line::from(Span::styled(self.texts.title.as_str(), title_style)))
            .render(row_rect(area, title_x, area.y + 1), buf);

        // Grid sized to content: labels | fields. Labels may take the room
        // left beside a full field, and at least half the width.
        let label_cap = area
            .width
            .saturating_sub(COLUMN_GAP + FIELD_WIDTH)
            .max(area.width / 2);
        let label_width = editor
            .params()
            .iter()
            .map(|p| text_width(&p.name))
            .max()
            .unwrap_or(0)
            .min(label_cap);
        let grid_width = label_width
            .saturating_add(COLUMN_GAP + FIELD_WIDTH)
            .min(area.width);
        let grid_x = area.x + area.width.saturating_sub(grid_width) / 2;
        let field_x = grid_x.saturating_add(label_width + COLUMN_GAP);
        let field_width = (area.x + area.width).saturating_sub(field_x).min(FIELD_WIDTH);

        let list_y = area.y + 3;
        let max_visible = area.height.saturating_sub(7).max(1) as usize;
        let focused_row = match focused {
            Focus::Field(i) => i,
            Focus::Emit => editor.params().len().saturating_sub(1),
        };
        let scroll = (focused_row + 1).saturating_sub(max_visible);

        let label_style = ratatui::style::Style::from(Style::new().fg(Color::CYAN));
        let label_focus_style =
            ratatui::style::Style::from(Style::new().fg(Color::WHITE).bg(Color::SELECTION_BG).bold());

        for (row, (i, (param, value))) in editor
            .fields()
            .enumerate()
            .skip(scroll)
            .take(max_visible)
            .enumerate()
        {
            let y = list_y + row as u16;
            let is_focused = focused == Focus::Field(i);

            let name_x = grid_x + label_width.saturating_sub(text_width(&param.name)) / 2;
            let style = if is_focused { label_focus_style } else { label_style };
            let name_rect = row_rect(area, name_x, y);
            Paragraph::new(Line::from(Span::styled(param.name.as_str(), style))).render(
                RatatuiRect {
                    width: name_rect.width.min(label_width),
                    ..name_rect
                },
                buf,
            );

            // Unsupported types render nothing; the registry logs them
            if let Some(renderer) = self.registry.resolve(param) {
                let cursor = is_focused.then(|| self.cursor_for(param.id, value));
                renderer.render(
                    FieldView {
                        param,
                        value,
                        cursor,
                    },
                    RatatuiRect::new(field_x, y, field_width, 1),
                    buf,
                );
            }
        }

        let visible_rows = editor.params().len().saturating_sub(scroll).min(max_visible) as u16;
        if scroll > 0 || scroll + max_visible < editor.params().len() {
            let indicator = format!(
                "{}-{}/{}",
                scroll + 1,
                scroll + visible_rows as usize,
                editor.params().len()
            );
            let muted = ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY));
            Paragraph::new(Line::from(Span::styled(indicator, muted)))
                .render(row_rect(area, grid_x, list_y + visible_rows), buf);
        }

        // Emit button
        let button = format!("[ {} ]", self.texts.emit_label);
        let button_style = if focused == Focus::Emit {
            Style::new().fg(Color::WHITE).bg(Color::SELECTION_BG).bold()
        } else {
            Style::new().fg(Color::SKY_BLUE)
        };
        let button_y = list_y + visible_rows + 2;
        if button_y < area.y + area.height {
            let button_x = area.x + area.width.saturating_sub(text_width(&button)) / 2;
            Paragraph::new(Line::from(Span::styled(
                button,
                ratatui::style::Style::from(button_style),
            )))
            .render(row_rect(area, button_x, button_y), buf);
        }

        let help_y = area.y + area.height.saturating_sub(1);
        if help_y > button_y {
            let help = "[Tab/Up/Down] Move  [Ctrl+e] Emit  [Ctrl+r] Reload  [F1] Help  [Ctrl+q] Quit";
            let help_x = area.x + area.width.saturating_sub(text_width(help)) / 2;
            Paragraph::new(Line::from(Span::styled(
                help,
                ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY)),
            )))
            .render(row_rect(area, help_x, help_y), buf);
        }
    }
}

impl Default for ParamEditorPane {
    fn default() -> Self {
        Self::new(EditorTexts::default())
    }
}

impl Pane for ParamEditorPane {
    fn id(&self) -> &'static str {
        "param_editor"
    }

    fn handle_input(&mut self, event: InputEvent, state: &AppState) -> Action {
        let lookup = self.keymap.lookup(&event);
        match lookup {
            Some("reload_model") => return Action::Session(SessionAction::ReloadModel),
            Some("reload_params") => return Action::Session(SessionAction::ReloadParams),
            _ => {}
        }
        if !state.editor.is_editing() {
            return Action::None;
        }

        let targets = self.targets(state);
        let focused = self.current(&targets);

        match (lookup, focused) {
            (Some("emit"), _) | (Some("activate"), Focus::Emit) => {
                return Action::Editor(EditorAction::Emit);
            }
            (Some("next"), _) | (Some("activate"), Focus::Field(_)) => {
                self.move_focus(targets.len(), true);
                return Action::None;
            }
            (Some("prev"), _) => {
                self.move_focus(targets.len(), false);
                return Action::None;
            }
            _ => {}
        }

        let Focus::Field(index) = focused else {
            return Action::None;
        };
        let Some(param) = state.editor.params().get(index) else {
            return Action::None;
        };

        let param_id = param.id;
        self.sync_input(param_id, state.editor.value_of(param_id));
        let Some(renderer) = self.registry.resolve(param) else {
            return Action::None;
        };
        match renderer.handle_input(&mut self.input, &event) {
            FieldInput::Changed(value) => Action::Editor(EditorAction::SetValue(param_id, value)),
            FieldInput::Consumed | FieldInput::Ignored => Action::None,
        }
    }

    fn render(&self, area: RatatuiRect, buf: &mut Buffer, state: &AppState) {
        match state.editor.status() {
            EditorStatus::NoParams => {
                let style = ratatui::style::Style::from(Style::new().fg(Color::ORANGE).bold());
                self.render_message(
                    area,
                    buf,
                    vec![Line::from(Span::styled(self.texts.no_params.as_str(), style))],
                );
            }
            EditorStatus::InvalidModel(err) => {
                let style = ratatui::style::Style::from(Style::new().fg(Color::RED).bold());
                let muted = ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY));
                self.render_message(
                    area,
                    buf,
                    vec![
                        Line::from(Span::styled(self.texts.invalid_model.as_str(), style)),
                        Line::from(Span::styled(err.to_string(), muted)),
                    ],
                );
            }
            EditorStatus::Editing => self.render_editor(area, buf, state),
        }
    }

    fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn on_enter(&mut self, _state: &AppState) {
        self.reset_input();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
