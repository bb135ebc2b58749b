//! Keyboard input for the viewers.
//!
//! Keys arrive as DOM `KeyboardEvent.key` strings from the browser and are
//! parsed once into [`Key`]. Each viewer maps them to its own actions and
//! publishes a [`Shortcut`] table that the renderer prints as help text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Char(char),
}

impl Key {
    /// Parse a DOM key name. Returns `None` for keys no viewer handles
    /// (modifiers, function keys, multi-character names).
    pub fn from_dom(key: &str) -> Option<Key> {
        match key {
            "Escape" | "Esc" => Some(Key::Escape),
            "ArrowLeft" | "Left" => Some(Key::ArrowLeft),
            "ArrowRight" | "Right" => Some(Key::ArrowRight),
            "ArrowUp" | "Up" => Some(Key::ArrowUp),
            "ArrowDown" | "Down" => Some(Key::ArrowDown),
            " " | "Spacebar" => Some(Key::Space),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// A key binding as shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub keys: &'static str,
    pub action: &'static str,
}

pub(crate) const fn shortcut(keys: &'static str, action: &'static str) -> Shortcut {
    Shortcut { keys, action }
}
