//! Keyboard navigation over the quick-link row.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
    Char(char),
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Focus is in an `<input>` or `<textarea>`.
    pub in_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            in_text_input: false,
        }
    }

    pub fn in_text_input(key: Key) -> Self {
        Self {
            key,
            in_text_input: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Ignore,
    Select(Option<usize>),
    /// Open the link at this position.
    Activate(usize),
}

/// Zero-based position for `1`-`9`, ASCII or full-width.
pub fn digit_index(c: char) -> Option<usize> {
    match c {
        '1'..='9' => Some(c as usize - '1' as usize),
        '１'..='９' => Some(c as usize - '１' as usize),
        _ => None,
    }
}

pub fn handle_key(event: &KeyEvent, selected: Option<usize>, count: usize) -> KeyAction {
    if event.in_text_input {
        return KeyAction::Ignore;
    }
    let last = count.checked_sub(1);

    match &event.key {
        Key::ArrowRight => KeyAction::Select(match (selected, last) {
            (_, None) => None,
            (None, Some(_)) => Some(0),
            (Some(i), Some(last)) => Some((i + 1).min(last)),
        }),
        Key::ArrowLeft => KeyAction::Select(match (selected, last) {
            (_, None) => None,
            (None, Some(_)) => Some(0),
            (Some(i), Some(last)) => Some(i.saturating_sub(1).min(last)),
        }),
        Key::Enter => match selected {
            Some(i) if i < count => KeyAction::Activate(i),
            _ => KeyAction::Ignore,
        },
        Key::Escape => KeyAction::Select(None),
        Key::Char(c) => match digit_index(*c) {
            Some(i) if i < count => KeyAction::Activate(i),
            _ => KeyAction::Ignore,
        },
        Key::Other => KeyAction::Ignore,
    }
}
