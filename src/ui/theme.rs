use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub number: Color,
    pub instruction: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub seam_bg: Color, // Row/column 0 of the torus
    pub popup_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    number: Color::Rgb(250, 179, 135),       // Orange for digits and stack values
    instruction: Color::Rgb(249, 226, 175),  // Yellow for recognized instructions
    border_normal: Color::Rgb(108, 112, 134), // Grey border
    current_line_bg: Color::Rgb(50, 50, 70),  // Status bar background
    seam_bg: Color::Rgb(40, 40, 58),
    popup_bg: Color::Rgb(69, 71, 90),
};
