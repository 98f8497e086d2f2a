use std::collections::VecDeque;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as RatatuiRect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::layout_helpers::truncate_to_width;
use super::{Color, Style};

const CONSOLE_LINES: u16 = 4;
const CONSOLE_CAPACITY: usize = 100;

/// Frame wrapping the active pane with border, header bar, and message console
pub struct Frame {
    messages: VecDeque<String>,
    pub source_label: String,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::with_capacity(CONSOLE_CAPACITY),
            source_label: String::new(),
        }
    }

    pub fn set_source_label(&mut self, label: String) {
        self.source_label = label;
    }

    /// Push a message to the console ring buffer
    pub fn push_message(&mut self, msg: String) {
        if self.messages.len() >= CONSOLE_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(msg);
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Area left for panes inside the border and above the console
    pub fn content_area(area: RatatuiRect) -> RatatuiRect {
        RatatuiRect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(CONSOLE_LINES + 3),
        )
    }

    /// Render the frame using ratatui buffer directly.
    pub fn render_buf(&self, area: RatatuiRect, buf: &mut Buffer) {
        if area.width < 10 || area.height < CONSOLE_LINES + 6 {
            return;
        }

        let border_style = ratatui::style::Style::from(Style::new().fg(Color::GRAY));

        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .render(area, buf);

        // Header line in the top border
        let header = format!(" PARAMEDIT - {} ", self.source_label);
        let header_style = ratatui::style::Style::from(Style::new().fg(Color::CYAN).bold());
        Paragraph::new(Line::from(Span::styled(header, header_style)))
            .render(RatatuiRect::new(area.x + 1, area.y, area.width.saturating_sub(2), 1), buf);

        // Console separator line
        let sep_y = area.y + area.height.saturating_sub(CONSOLE_LINES + 2);
        if let Some(cell) = buf.cell_mut((area.x, sep_y)) {
            cell.set_char('├').set_style(border_style);
        }
        for x in (area.x + 1)..(area.x + area.width.saturating_sub(1)) {
            if let Some(cell) = buf.cell_mut((x, sep_y)) {
                cell.set_char('─').set_style(border_style);
            }
        }
        if let Some(cell) = buf.cell_mut((area.x + area.width.saturating_sub(1), sep_y)) {
            cell.set_char('┤').set_style(border_style);
        }

        // Console messages, newest at the bottom
        let console_y = sep_y + 1;
        let skip = self.messages.len().saturating_sub(CONSOLE_LINES as usize);

        let max_width = area.width.saturating_sub(6) as usize;

        let prompt_style = ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY));
        let msg_style = ratatui::style::Style::from(Style::new().fg(Color::SKY_BLUE));

        for (i, msg) in self.messages().skip(skip).enumerate() {
            let y = console_y + i as u16;
            let line = Line::from(vec![
                Span::styled("> ", prompt_style),
                Span::styled(truncate_to_width(msg, max_width), msg_style),
            ]);
            Paragraph::new(line).render(
                RatatuiRect::new(area.x + 2, y, area.width.saturating_sub(4), 1),
                buf,
            );
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                if let Some(cell) = buf.cell((x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_console_keeps_latest_messages() {
        let mut frame = Frame::new();
        for i in 0..(CONSOLE_CAPACITY + 5) {
            frame.push_message(format!("msg {}", i));
        }
        assert_eq!(frame.messages().count(), CONSOLE_CAPACITY);
        assert_eq!(frame.messages().next(), Some("msg 5"));
    }

    #[test]
    fn test_render_header_and_console() {
        let mut frame = Frame::new();
        frame.set_source_label("demo".to_string());
        frame.push_message("hello".to_string());

        let area = RatatuiRect::new(0, 0, 40, 14);
        let mut buf = Buffer::empty(area);
        frame.render_buf(area, &mut buf);

        let text = screen(&buf);
        assert!(text.contains("PARAMEDIT - demo"));
        assert!(text.contains("> hello"));
    }

    #[test]
    fn test_console_clips_wide_messages_by_column() {
        let mut frame = Frame::new();
        frame.push_message("用".repeat(40));

        let area = RatatuiRect::new(0, 0, 20, 12);
        let mut buf = Buffer::empty(area);
        frame.render_buf(area, &mut buf);

        // 14 columns of room: seven wide glyphs, border intact
        let last = screen(&buf).lines().nth(7).unwrap_or_default().to_string();
        assert_eq!(last.matches('用').count(), 7);
        assert!(last.ends_with('│'));
    }

    #[test]
    fn test_content_area_excludes_console() {
        let area = RatatuiRect::new(0, 0, 80, 24);
        assert_eq!(Frame::content_area(area), RatatuiRect::new(1, 1, 78, 17));
    }
}
