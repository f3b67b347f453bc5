//! HID symbol tables.
//!
//! Three fixed tables map script text to HID usage codes: unshifted
//! printable characters, shifted printable characters (typed with the shift
//! modifier held) and named special keys. They are exposed as pure lookup
//! functions over `match` tables, so nothing here is mutable.

bitflags::bitflags! {
    /// Modifier keys held together with a key press.
    ///
    /// Serialized as the second byte of an [`Instruction`](crate::encoder::Instruction).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const CTRL  = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT   = 1 << 2;
        const GUI   = 1 << 3;
    }
}

impl Modifiers {
    /// Resolve a modifier keyword such as `CTRL` or `command`.
    ///
    /// Matching is case-insensitive. Returns `None` for anything that is not
    /// a modifier alias.
    pub fn from_alias(token: &str) -> Option<Self> {
        let modifier = match token.to_uppercase().as_str() {
            "CTRL" | "CONTROL" => Self::CTRL,
            "SHIFT" => Self::SHIFT,
            "ALT" | "OPTION" => Self::ALT,
            "GUI" | "WINDOWS" | "COMMAND" | "CMD" | "META" => Self::GUI,
            _ => return None,
        };
        Some(modifier)
    }
}

/// Keywords that route a whole line to the modifier-combo resolver when the
/// upper-cased line starts with one of them.
pub const COMBO_PREFIXES: [&str; 8] = [
    "CTRL", "CONTROL", "ALT", "SHIFT", "GUI", "WINDOWS", "COMMAND", "CMD",
];

/// Usage code of the ENTER key, appended by `STRINGLN`.
pub const ENTER: u8 = 0x28;

/// Usage code of a character typed without modifiers.
pub fn unshifted(c: char) -> Option<u8> {
    let code = match c {
        'a'..='z' => 0x04 + (c as u8 - b'a'),
        '1'..='9' => 0x1e + (c as u8 - b'1'),
        '0' => 0x27,
        ' ' => 0x2c,
        '-' => 0x2d,
        '=' => 0x2e,
        '[' => 0x2f,
        ']' => 0x30,
        '\\' => 0x31,
        ';' => 0x33,
        '\'' => 0x34,
        '`' => 0x35,
        ',' => 0x36,
        '.' => 0x37,
        '/' => 0x38,
        _ => return None,
    };
    Some(code)
}

/// Usage code of a character that is typed with shift held.
pub fn shifted(c: char) -> Option<u8> {
    let code = match c {
        'A'..='Z' => 0x04 + (c as u8 - b'A'),
        '!' => 0x1e,
        '@' => 0x1f,
        '#' => 0x20,
        '$' => 0x21,
        '%' => 0x22,
        '^' => 0x23,
        '&' => 0x24,
        '*' => 0x25,
        '(' => 0x26,
        ')' => 0x27,
        '_' => 0x2d,
        '+' => 0x2e,
        '{' => 0x2f,
        '}' => 0x30,
        '|' => 0x31,
        ':' => 0x33,
        '"' => 0x34,
        '~' => 0x35,
        '<' => 0x36,
        '>' => 0x37,
        '?' => 0x38,
        _ => return None,
    };
    Some(code)
}

/// Usage code of a named special key.
///
/// The name must already be upper-case; use [`lookup`] for
/// case-insensitive resolution.
pub fn named(name: &str) -> Option<u8> {
    let code = match name {
        "ENTER" | "RETURN" => ENTER,
        "ESCAPE" | "ESC" => 0x29,
        "BACKSPACE" | "BSPACE" => 0x2a,
        "TAB" => 0x2b,
        "SPACE" => 0x2c,
        "CAPSLOCK" => 0x39,

        // Function keys
        "F1" => 0x3a,
        "F2" => 0x3b,
        "F3" => 0x3c,
        "F4" => 0x3d,
        "F5" => 0x3e,
        "F6" => 0x3f,
        "F7" => 0x40,
        "F8" => 0x41,
        "F9" => 0x42,
        "F10" => 0x43,
        "F11" => 0x44,
        "F12" => 0x45,

        "PRINTSCREEN" => 0x46,
        "SCROLLLOCK" => 0x47,
        "PAUSE" | "BREAK" => 0x48,
        "INSERT" => 0x49,
        "HOME" => 0x4a,
        "PAGEUP" => 0x4b,
        "DELETE" | "DEL" => 0x4c,
        "END" => 0x4d,
        "PAGEDOWN" => 0x4e,

        // Arrow keys
        "RIGHT" | "RIGHTARROW" => 0x4f,
        "LEFT" | "LEFTARROW" => 0x50,
        "DOWN" | "DOWNARROW" => 0x51,
        "UP" | "UPARROW" => 0x52,

        "NUMLOCK" => 0x53,
        "APP" | "MENU" => 0x65,
        _ => return None,
    };
    Some(code)
}

/// Resolve a key token to its usage code.
///
/// Tries named keys (upper-cased), then unshifted characters (lower-cased),
/// then shifted characters verbatim. The shift modifier implied by a shifted
/// character is not part of the result.
pub fn lookup(token: &str) -> Option<u8> {
    if let Some(code) = named(&token.to_uppercase()) {
        return Some(code);
    }
    if let Some(code) = single_char(&token.to_lowercase()).and_then(unshifted) {
        return Some(code);
    }
    single_char(token).and_then(shifted)
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
