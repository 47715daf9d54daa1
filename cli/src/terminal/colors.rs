use colored::Color;

pub const PRIMARY: Color = Color::TrueColor {
    r: 110,
    g: 200,
    b: 250,
};
pub const ACCENT: Color = Color::TrueColor {
    r: 250,
    g: 190,
    b: 80,
};
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const MAC_ADDR: Color = Color::TrueColor {
    r: 200,
    g: 150,
    b: 250,
};
pub const MISSING: Color = Color::BrightBlack;

pub const STATUS_UP: Color = Color::Green;
pub const STATUS_DOWN: Color = Color::Red;
pub const STATUS_OTHER: Color = Color::Yellow;
