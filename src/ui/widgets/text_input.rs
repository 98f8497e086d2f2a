use ratatui::buffer::Buffer;
use ratatui::layout::Rect as RatatuiRect;
use unicode_width::UnicodeWidthChar;

use crate::ui::layout_helpers::truncate_to_width;

use crate::ui::{Color, InputEvent, KeyCode, Style};

/// Single-line text editing state. The cursor is a char index, not a byte
/// offset, so multi-byte text edits cleanly.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle input, returns true if the event was consumed
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event.key {
            KeyCode::Char(ch) if !event.modifiers.ctrl && !event.modifiers.alt => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, ch);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                if self.cursor < self.len() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.len();
                true
            }
            _ => false,
        }
    }

    /// Render `value` as a bracketed field one row high. The cursor is drawn
    /// only when `cursor` is given.
    pub fn render_value(value: &str, cursor: Option<usize>, area: RatatuiRect, buf: &mut Buffer) {
        if area.width < 3 || area.height == 0 {
            return;
        }
        let y = area.y;
        let border_style = if cursor.is_some() {
            Style::new().fg(Color::SKY_BLUE)
        } else {
            Style::new().fg(Color::GRAY)
        };
        let right = area.x + area.width - 1;
        if let Some(cell) = buf.cell_mut((area.x, y)) {
            cell.set_char('[').set_style(border_style);
        }
        if let Some(cell) = buf.cell_mut((right, y)) {
            cell.set_char(']').set_style(border_style);
        }

        let content_x = area.x + 1;
        let content_width = (area.width - 2) as usize;
        let chars: Vec<char> = value.chars().collect();
        let char_width = |ch: &char| ch.width().unwrap_or(0);

        // Scroll by columns so the cursor cell stays visible
        let mut skip = 0;
        if let Some(c) = cursor {
            let c = c.min(chars.len());
            let cursor_cell = chars.get(c).map(char_width).unwrap_or(1).max(1);
            let mut span: usize = chars[..c].iter().map(char_width).sum();
            while skip < c && span + cursor_cell > content_width {
                span -= char_width(&chars[skip]);
                skip += 1;
            }
        }

        let start = value
            .char_indices()
            .nth(skip)
            .map(|(i, _)| i)
            .unwrap_or(value.len());
        let visible = truncate_to_width(&value[start..], content_width);
        buf.set_stringn(
            content_x,
            y,
            visible,
            content_width,
            ratatui::style::Style::from(Style::new().fg(Color::WHITE)),
        );

        if let Some(c) = cursor {
            let c = c.min(chars.len());
            let col: usize = chars[skip..c].iter().map(char_width).sum();
            if col < content_width {
                let cursor_style = Style::new().fg(Color::WHITE).bg(Color::SELECTION_BG);
                if let Some(cell) = buf.cell_mut((content_x + col as u16, y)) {
                    if c == chars.len() {
                        cell.set_char(' ');
                    }
                    cell.set_style(cursor_style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Modifiers;

    fn type_str(input: &mut TextInput, s: &str) {
        for ch in s.chars() {
            input.handle_input(&InputEvent::key(KeyCode::Char(ch)));
        }
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = TextInput::new();
        input.set_value("casual");
        input.handle_input(&InputEvent::key(KeyCode::Backspace));
        type_str(&mut input, "ly");
        assert_eq!(input.value(), "casualy");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new();
        input.set_value("макси");
        input.handle_input(&InputEvent::key(KeyCode::Home));
        input.handle_input(&InputEvent::key(KeyCode::Delete));
        type_str(&mut input, "Т");
        input.handle_input(&InputEvent::key(KeyCode::End));
        input.handle_input(&InputEvent::key(KeyCode::Left));
        input.handle_input(&InputEvent::key(KeyCode::Backspace));
        assert_eq!(input.value(), "Таки");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_ctrl_chars_not_consumed() {
        let mut input = TextInput::new();
        assert!(!input.handle_input(&InputEvent::new(KeyCode::Char('e'), Modifiers::ctrl())));
        assert!(!input.handle_input(&InputEvent::key(KeyCode::Tab)));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_render_value_clips() {
        let area = RatatuiRect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        TextInput::render_value("formal wear", None, area, &mut buf);
        assert_eq!(row(&buf, 0), "[formal]");
    }

    #[test]
    fn test_render_value_measures_wide_chars() {
        let area = RatatuiRect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        TextInput::render_value("用途abc", None, area, &mut buf);
        assert_eq!(row(&buf, 0), "[用 途 ab]");
    }

    #[test]
    fn test_render_value_scrolls_wide_chars_by_column() {
        let area = RatatuiRect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        TextInput::render_value("用途ab", Some(4), area, &mut buf);
        assert_eq!(row(&buf, 0), "[途 ab  ]");
        assert_eq!(
            buf.cell((5, 0)).map(|c| c.bg),
            Some(ratatui::style::Color::from(Color::SELECTION_BG))
        );
    }

    #[test]
    fn test_render_value_scrolls_to_cursor() {
        let area = RatatuiRect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        TextInput::render_value("abcdefg", Some(7), area, &mut buf);
        assert_eq!(row(&buf, 0), "[efg ]");
    }
}
