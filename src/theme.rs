use ratatui::style::Color;

// Centralized theme colors, kept as small helpers so components never
// hard-code a palette.

pub const ACCENT_RGB: (u8, u8, u8) = (0, 150, 136);
pub const BADGE_RGB: (u8, u8, u8) = (229, 57, 53);
pub const ACCEPT_RGB: (u8, u8, u8) = (67, 160, 71);
pub const REJECT_RGB: (u8, u8, u8) = (198, 40, 40);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

// Bubble
pub fn bubble_bg() -> Color {
    rgb_to_color(ACCENT_RGB)
}
pub fn bubble_fg() -> Color {
    Color::White
}
pub fn bubble_dragging_bg() -> Color {
    Color::Cyan
}
pub fn badge_bg() -> Color {
    rgb_to_color(BADGE_RGB)
}
pub fn badge_fg() -> Color {
    Color::White
}

// Popup card
pub fn popup_bg() -> Color {
    Color::Black
}
pub fn popup_fg() -> Color {
    Color::White
}
pub fn popup_muted() -> Color {
    Color::Gray
}
pub fn popup_price() -> Color {
    rgb_to_color(ACCENT_RGB)
}
pub fn popup_separator() -> Color {
    Color::DarkGray
}
pub fn accept_bg() -> Color {
    rgb_to_color(ACCEPT_RGB)
}
pub fn reject_bg() -> Color {
    rgb_to_color(REJECT_RGB)
}
pub fn button_fg() -> Color {
    Color::White
}
pub fn button_idle_bg() -> Color {
    Color::DarkGray
}

// Status line
pub fn status_bg() -> Color {
    Color::DarkGray
}
pub fn status_fg() -> Color {
    Color::White
}
