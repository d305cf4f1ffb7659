//! # Key Tokens
//!
//! Parses the textual key names read by the headless driver, one per line.

use crate::input::{InputEvent, KeyCode};

/// Parses a key token such as `up` or `esc`.
///
/// Matching ignores case and surrounding whitespace. `quit` is the input
/// source closing rather than a key. Anything unknown becomes a key press
/// that no binding will match.
///
/// # Examples
///
/// ```
/// use delve::{parse_key_token, InputEvent, KeyCode};
///
/// assert_eq!(parse_key_token(" Left "), InputEvent::KeyDown(KeyCode::Left));
/// assert_eq!(parse_key_token("quit"), InputEvent::Quit);
/// assert_eq!(parse_key_token("x"), InputEvent::KeyDown(KeyCode::Char('x')));
/// ```
pub fn parse_key_token(token: &str) -> InputEvent {
    let token = token.trim().to_ascii_lowercase();
    let key = match token.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "escape" | "esc" => KeyCode::Escape,
        "quit" => return InputEvent::Quit,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => KeyCode::Other,
            }
        }
    };

    InputEvent::KeyDown(key)
}
