//! Keyboard values
//!
//! A key action carries exactly one code point on the wire. Special keys
//! (modifiers, arrows, function keys) live in the Unicode private use area
//! starting at U+E000.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::errors::ActionError;

macro_rules! named_keys {
    ($($variant:ident => ($name:literal, $code:literal)),+ $(,)?) => {
        /// Special keys with a reserved code point.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NamedKey {
            $($variant),+
        }

        impl NamedKey {
            pub const ALL: &'static [NamedKey] = &[$(NamedKey::$variant),+];

            pub fn code_point(self) -> char {
                match self {
                    $(NamedKey::$variant => $code),+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(NamedKey::$variant => $name),+
                }
            }
        }
    };
}

named_keys! {
    Null => ("null", '\u{E000}'),
    Cancel => ("cancel", '\u{E001}'),
    Help => ("help", '\u{E002}'),
    Backspace => ("backspace", '\u{E003}'),
    Tab => ("tab", '\u{E004}'),
    Clear => ("clear", '\u{E005}'),
    Return => ("return", '\u{E006}'),
    Enter => ("enter", '\u{E007}'),
    Shift => ("shift", '\u{E008}'),
    Control => ("control", '\u{E009}'),
    Alt => ("alt", '\u{E00A}'),
    Pause => ("pause", '\u{E00B}'),
    Escape => ("escape", '\u{E00C}'),
    Space => ("space", '\u{E00D}'),
    PageUp => ("page_up", '\u{E00E}'),
    PageDown => ("page_down", '\u{E00F}'),
    End => ("end", '\u{E010}'),
    Home => ("home", '\u{E011}'),
    ArrowLeft => ("arrow_left", '\u{E012}'),
    ArrowUp => ("arrow_up", '\u{E013}'),
    ArrowRight => ("arrow_right", '\u{E014}'),
    ArrowDown => ("arrow_down", '\u{E015}'),
    Insert => ("insert", '\u{E016}'),
    Delete => ("delete", '\u{E017}'),
    Semicolon => ("semicolon", '\u{E018}'),
    Equals => ("equals", '\u{E019}'),
    Numpad0 => ("numpad0", '\u{E01A}'),
    Numpad1 => ("numpad1", '\u{E01B}'),
    Numpad2 => ("numpad2", '\u{E01C}'),
    Numpad3 => ("numpad3", '\u{E01D}'),
    Numpad4 => ("numpad4", '\u{E01E}'),
    Numpad5 => ("numpad5", '\u{E01F}'),
    Numpad6 => ("numpad6", '\u{E020}'),
    Numpad7 => ("numpad7", '\u{E021}'),
    Numpad8 => ("numpad8", '\u{E022}'),
    Numpad9 => ("numpad9", '\u{E023}'),
    Multiply => ("multiply", '\u{E024}'),
    Add => ("add", '\u{E025}'),
    Separator => ("separator", '\u{E026}'),
    Subtract => ("subtract", '\u{E027}'),
    Decimal => ("decimal", '\u{E028}'),
    Divide => ("divide", '\u{E029}'),
    F1 => ("f1", '\u{E031}'),
    F2 => ("f2", '\u{E032}'),
    F3 => ("f3", '\u{E033}'),
    F4 => ("f4", '\u{E034}'),
    F5 => ("f5", '\u{E035}'),
    F6 => ("f6", '\u{E036}'),
    F7 => ("f7", '\u{E037}'),
    F8 => ("f8", '\u{E038}'),
    F9 => ("f9", '\u{E039}'),
    F10 => ("f10", '\u{E03A}'),
    F11 => ("f11", '\u{E03B}'),
    F12 => ("f12", '\u{E03C}'),
    Meta => ("meta", '\u{E03D}'),
    ZenkakuHankaku => ("zenkaku_hankaku", '\u{E040}'),
    RightShift => ("right_shift", '\u{E050}'),
    RightControl => ("right_control", '\u{E051}'),
    RightAlt => ("right_alt", '\u{E052}'),
    RightMeta => ("right_meta", '\u{E053}'),
    RightPageUp => ("right_page_up", '\u{E054}'),
    RightPageDown => ("right_page_down", '\u{E055}'),
    RightEnd => ("right_end", '\u{E056}'),
    RightHome => ("right_home", '\u{E057}'),
    RightArrowLeft => ("right_arrow_left", '\u{E058}'),
    RightArrowUp => ("right_arrow_up", '\u{E059}'),
    RightArrowRight => ("right_arrow_right", '\u{E05A}'),
    RightArrowDown => ("right_arrow_down", '\u{E05B}'),
    RightInsert => ("right_insert", '\u{E05C}'),
    RightDelete => ("right_delete", '\u{E05D}'),
}

/// Extra spellings accepted when parsing key names.
const KEY_ALIASES: &[(&str, NamedKey)] = &[
    ("left", NamedKey::ArrowLeft),
    ("up", NamedKey::ArrowUp),
    ("right", NamedKey::ArrowRight),
    ("down", NamedKey::ArrowDown),
    ("ctrl", NamedKey::Control),
    ("command", NamedKey::Meta),
    ("cmd", NamedKey::Meta),
    ("esc", NamedKey::Escape),
    ("option", NamedKey::Alt),
    ("pageup", NamedKey::PageUp),
    ("pagedown", NamedKey::PageDown),
    ("left_shift", NamedKey::Shift),
    ("left_control", NamedKey::Control),
    ("left_alt", NamedKey::Alt),
];

impl NamedKey {
    pub fn from_name(name: &str) -> Option<NamedKey> {
        let name = name.to_ascii_lowercase();
        NamedKey::ALL
            .iter()
            .copied()
            .find(|key| key.name() == name)
            .or_else(|| {
                KEY_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == name)
                    .map(|(_, key)| *key)
            })
    }

    pub fn from_code_point(code: char) -> Option<NamedKey> {
        NamedKey::ALL
            .iter()
            .copied()
            .find(|key| key.code_point() == code)
    }
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single key, normalized to one code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Named(NamedKey),
    Char(char),
}

impl Key {
    pub fn code_point(&self) -> char {
        match self {
            Key::Named(named) => named.code_point(),
            Key::Char(c) => *c,
        }
    }
}

impl From<NamedKey> for Key {
    fn from(key: NamedKey) -> Self {
        Key::Named(key)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        match NamedKey::from_code_point(c) {
            Some(named) => Key::Named(named),
            None => Key::Char(c),
        }
    }
}

impl FromStr for Key {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(ActionError::validation("key must not be empty")),
            (Some(c), None) => Ok(Key::from(c)),
            _ => NamedKey::from_name(s).map(Key::Named).ok_or_else(|| {
                ActionError::validation(format!(
                    "{:?} is neither a single code point nor a known key name",
                    s
                ))
            }),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Named(named) => write!(f, "<{}>", named),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.code_point().encode_utf8(&mut buf))
    }
}

/// Anything a key gesture accepts.
pub trait IntoKey {
    fn into_key(self) -> Result<Key, ActionError>;
}

impl IntoKey for Key {
    fn into_key(self) -> Result<Key, ActionError> {
        Ok(self)
    }
}

impl IntoKey for NamedKey {
    fn into_key(self) -> Result<Key, ActionError> {
        Ok(Key::Named(self))
    }
}

impl IntoKey for char {
    fn into_key(self) -> Result<Key, ActionError> {
        Ok(Key::from(self))
    }
}

impl IntoKey for &str {
    fn into_key(self) -> Result<Key, ActionError> {
        self.parse()
    }
}

impl IntoKey for &String {
    fn into_key(self) -> Result<Key, ActionError> {
        self.parse()
    }
}

impl IntoKey for String {
    fn into_key(self) -> Result<Key, ActionError> {
        self.parse()
    }
}
