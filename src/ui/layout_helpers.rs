use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Center a rect of `width x height` within the given `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(x, y, w, h)
}

/// Width of a string in terminal columns
pub fn text_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// Longest prefix of `s` that fits in `max_width` columns
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (i, ch) in s.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > max_width {
            return &s[..i];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(center_rect(area, 40, 10), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_center_rect_clamps_to_area() {
        let area = Rect::new(2, 2, 10, 5);
        let rect = center_rect(area, 40, 10);
        assert_eq!((rect.width, rect.height), (10, 5));
        assert_eq!((rect.x, rect.y), (2, 2));
    }

    #[test]
    fn test_text_width_counts_columns() {
        assert_eq!(text_width("Длина"), 5);
        assert_eq!(text_width("用途用途"), 8);
        assert_eq!(text_width(&"x".repeat(70_000)), u16::MAX);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("casual", 4), "casu");
        assert_eq!(truncate_to_width("用途abc", 3), "用");
        assert_eq!(truncate_to_width("用途abc", 5), "用途a");
        assert_eq!(truncate_to_width("maxi", 10), "maxi");
    }
}
