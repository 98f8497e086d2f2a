use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as RatatuiRect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::state::AppState;
use crate::ui::layout_helpers::center_rect;
use crate::ui::{Action, Color, InputEvent, KeyCode, Keymap, NavAction, Pane, Style};

pub struct HelpPane {
    keymap: Keymap,
    /// The keymap to display (from another pane)
    display_keymap: Vec<(String, String)>, // (key, description)
    /// Title showing which pane's help this is
    title: String,
    /// Scroll offset for long keymaps
    scroll: usize,
}

impl HelpPane {
    pub fn new() -> Self {
        Self {
            keymap: Keymap::new()
                .bind_key(KeyCode::Escape, "close", "Close help")
                .bind_key(KeyCode::F(1), "close", "Close help")
                .bind_key(KeyCode::Up, "up", "Scroll up")
                .bind_key(KeyCode::Down, "down", "Scroll down"),
            display_keymap: Vec::new(),
            title: String::new(),
            scroll: 0,
        }
    }

    /// Set the keymap to display
    pub fn set_context(&mut self, pane_title: &str, keymap: &Keymap) {
        self.title = pane_title.to_string();
        self.scroll = 0;

        self.display_keymap = keymap
            .bindings()
            .iter()
            .map(|b| (b.pattern.display(), b.description.to_string()))
            .collect();
        self.display_keymap
            .push(("F1".to_string(), "Toggle this help".to_string()));
        self.display_keymap
            .push(("Ctrl+q".to_string(), "Quit".to_string()));
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.display_keymap
    }
}

impl Default for HelpPane {
    fn default() -> Self {
        Self::new()
    }
}

impl Pane for HelpPane {
    fn id(&self) -> &'static str {
        "help"
    }

    fn handle_input(&mut self, event: InputEvent, _state: &AppState) -> Action {
        match self.keymap.lookup(&event) {
            Some("close") => Action::Nav(NavAction::PopPane),
            Some("up") => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            Some("down") => {
                if self.scroll + 1 < self.display_keymap.len() {
                    self.scroll += 1;
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&self, area: RatatuiRect, buf: &mut Buffer, _state: &AppState) {
        let rect = center_rect(area, 60, 16);
        let title = format!(" Help: {} ", self.title);

        Clear.render(rect, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(ratatui::style::Style::from(Style::new().fg(Color::SKY_BLUE)))
            .title_style(ratatui::style::Style::from(Style::new().fg(Color::SKY_BLUE)));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let visible_lines = inner.height.saturating_sub(3) as usize;
        let max_scroll = self.display_keymap.len().saturating_sub(visible_lines);
        let scroll = self.scroll.min(max_scroll);

        let key_style = ratatui::style::Style::from(Style::new().fg(Color::CYAN).bold());
        let desc_style = ratatui::style::Style::from(Style::new().fg(Color::WHITE));

        for (i, (key, desc)) in self
            .display_keymap
            .iter()
            .skip(scroll)
            .take(visible_lines)
            .enumerate()
        {
            let y = inner.y + 1 + i as u16;
            let max_desc_len = inner.width.saturating_sub(14) as usize;
            let desc_truncated: String = desc.chars().take(max_desc_len).collect();

            let line = Line::from(vec![
                Span::styled(format!("{:<12}", key), key_style),
                Span::styled(desc_truncated, desc_style),
            ]);
            let line_area = RatatuiRect::new(inner.x + 1, y, inner.width.saturating_sub(1), 1);
            Paragraph::new(line).render(line_area, buf);
        }

        // Help text at bottom
        if inner.height > 0 {
            let help_area = RatatuiRect::new(
                inner.x + 1,
                inner.y + inner.height - 1,
                inner.width.saturating_sub(1),
                1,
            );
            Paragraph::new(Line::from(Span::styled(
                "[ESC/F1] Close  [Up/Down] Scroll",
                ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY)),
            )))
            .render(help_area, buf);
        }
    }

    fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn is_overlay(&self) -> bool {
        true
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panes::ParamEditorPane;
    use crate::source::ModelSource;

    #[test]
    fn test_lists_editor_bindings() {
        let editor = ParamEditorPane::default();
        let mut help = HelpPane::new();
        help.set_context("Parameter editor", editor.keymap());

        let keys: Vec<&str> = help.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"Ctrl+e"));
        assert!(keys.contains(&"Tab"));
        assert_eq!(keys.last(), Some(&"Ctrl+q"));

        let area = RatatuiRect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let state = AppState::load(ModelSource::Demo).unwrap();
        help.render(area, &mut buf, &state);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .filter_map(|pos| buf.cell(pos).map(|c| c.symbol().to_string()))
            .collect();
        assert!(text.contains("Help: Parameter editor"));
        assert!(text.contains("Print model to console"));
    }

    #[test]
    fn test_close_pops() {
        let state = AppState::load(ModelSource::Demo).unwrap();
        let mut help = HelpPane::new();
        assert_eq!(
            help.handle_input(InputEvent::key(KeyCode::Escape), &state),
            Action::Nav(NavAction::PopPane)
        );
        assert_eq!(
            help.handle_input(InputEvent::key(KeyCode::F(1)), &state),
            Action::Nav(NavAction::PopPane)
        );
    }
}
