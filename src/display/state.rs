//! Session state tags.

use crossterm::style::Color;

/// Palette for session state tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateColor {
    Green,
    Red,
    Blue,
    Orange,
    Yellow,
    /// Neutral colour for states we do not recognise.
    SecondaryText,
}

impl StateColor {
    /// Terminal colour used when printing the tag.
    pub fn terminal_color(self) -> Color {
        match self {
            StateColor::Green => Color::Green,
            StateColor::Red => Color::Red,
            StateColor::Blue => Color::Blue,
            StateColor::Orange => Color::Rgb {
                r: 255,
                g: 165,
                b: 0,
            },
            StateColor::Yellow => Color::Yellow,
            StateColor::SecondaryText => Color::DarkGrey,
        }
    }
}

/// Colour for a session state label. Case-insensitive; never fails.
pub fn state_color(state: &str) -> StateColor {
    match state.to_lowercase().as_str() {
        "succeeded" | "completed" => StateColor::Green,
        "failed" | "error" => StateColor::Red,
        "in_progress" | "running" | "active" => StateColor::Blue,
        "awaiting_user_feedback" => StateColor::Orange,
        "pending" => StateColor::Yellow,
        _ => StateColor::SecondaryText,
    }
}
