use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(10, 12, 18),
            surface: Color::Rgb(22, 26, 36),
            text: Color::Rgb(225, 225, 230),
            dim: Color::Rgb(130, 135, 150),
            accent: Color::Rgb(247, 147, 26),
            border: Color::Rgb(60, 66, 82),
            border_focused: Color::Rgb(247, 147, 26),
            positive: Color::Rgb(90, 190, 120),
            negative: Color::Rgb(220, 95, 95),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
