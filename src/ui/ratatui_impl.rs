use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode as CrosstermKeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend, buffer::Buffer, layout::Rect as RatatuiRect, Terminal,
};

use super::{InputEvent, InputSource, KeyCode, Modifiers};

/// Ratatui-based terminal backend
pub struct RatatuiBackend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl RatatuiBackend {
    /// Create a new ratatui backend (does not start terminal mode)
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Enter raw mode and alternate screen
    pub fn start(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Leave raw mode and alternate screen
    pub fn stop(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Draw one frame straight into the terminal buffer
    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(RatatuiRect, &mut Buffer),
    {
        self.terminal.draw(|f| {
            let area = f.area();
            render(area, f.buffer_mut());
        })?;
        Ok(())
    }
}

impl InputSource for RatatuiBackend {
    fn poll_event(&mut self, timeout: Duration) -> Option<InputEvent> {
        if event::poll(timeout).ok()? {
            if let Event::Key(key_event) = event::read().ok()? {
                if key_event.kind == KeyEventKind::Press {
                    return Some(convert_key_event(key_event));
                }
            }
        }
        None
    }
}

fn convert_key_event(event: KeyEvent) -> InputEvent {
    let key = match event.code {
        CrosstermKeyCode::Char(c) => KeyCode::Char(c),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Esc => KeyCode::Escape,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::F(n) => KeyCode::F(n),
        _ => KeyCode::Other,
    };

    let modifiers = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
    };

    InputEvent::new(key, modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_ctrl_char() {
        let event = KeyEvent::new(CrosstermKeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_eq!(convert_key_event(event), InputEvent::ctrl('e'));
    }

    #[test]
    fn test_convert_backtab() {
        let event = KeyEvent::new(CrosstermKeyCode::BackTab, KeyModifiers::SHIFT);
        let converted = convert_key_event(event);
        assert_eq!(converted.key, KeyCode::BackTab);
        assert!(converted.modifiers.shift);
    }

    #[test]
    fn test_unmapped_key() {
        let event = KeyEvent::new(CrosstermKeyCode::Insert, KeyModifiers::NONE);
        assert_eq!(convert_key_event(event).key, KeyCode::Other);
    }
}
