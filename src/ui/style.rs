use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

/// RGB Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 80, 80);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const DARK_GRAY: Color = Color::new(64, 64, 64);
    pub const ORANGE: Color = Color::new(255, 165, 0);
    pub const SKY_BLUE: Color = Color::new(135, 206, 235);
    pub const SELECTION_BG: Color = Color::new(40, 60, 100);
}

/// Text style with foreground, background, and attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub underline: bool,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            underline: false,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl From<Color> for RatatuiColor {
    fn from(c: Color) -> Self {
        RatatuiColor::Rgb(c.r, c.g, c.b)
    }
}

impl From<Style> for RatatuiStyle {
    fn from(style: Style) -> Self {
        let mut rs = RatatuiStyle::default();
        if let Some(fg) = style.fg {
            rs = rs.fg(fg.into());
        }
        if let Some(bg) = style.bg {
            rs = rs.bg(bg.into());
        }
        if style.bold {
            rs = rs.add_modifier(Modifier::BOLD);
        }
        if style.underline {
            rs = rs.add_modifier(Modifier::UNDERLINED);
        }
        rs
    }
}
