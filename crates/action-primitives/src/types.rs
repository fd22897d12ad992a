//! Core data types for primitive actions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use wd_core_types::ElementRef;

use crate::errors::ActionError;
use crate::keys::Key;

/// Kind of input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Keyboard-like source
    Key,

    /// Mouse, pen or touch source
    Pointer,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Key => f.write_str("key"),
            DeviceKind::Pointer => f.write_str("pointer"),
        }
    }
}

/// Physical flavour of a pointer source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

impl Default for PointerKind {
    fn default() -> Self {
        PointerKind::Mouse
    }
}

impl FromStr for PointerKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mouse" => Ok(PointerKind::Mouse),
            "pen" => Ok(PointerKind::Pen),
            "touch" => Ok(PointerKind::Touch),
            other => Err(ActionError::validation(format!(
                "{:?} is not a valid pointer type",
                other
            ))),
        }
    }
}

impl fmt::Display for PointerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerKind::Mouse => f.write_str("mouse"),
            PointerKind::Pen => f.write_str("pen"),
            PointerKind::Touch => f.write_str("touch"),
        }
    }
}

/// Named pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub fn code(self) -> i64 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

impl From<MouseButton> for i64 {
    fn from(button: MouseButton) -> Self {
        button.code()
    }
}

/// Coordinate frame of a pointer move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Absolute coordinates in the viewport
    Viewport,

    /// Offset from the pointer's current position
    Pointer,

    /// Offset from the center of an element
    Element(ElementRef),
}

impl Default for Origin {
    fn default() -> Self {
        Origin::Viewport
    }
}

impl Serialize for Origin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Origin::Viewport => serializer.serialize_str("viewport"),
            Origin::Pointer => serializer.serialize_str("pointer"),
            Origin::Element(element) => element.to_wire().serialize(serializer),
        }
    }
}

/// One primitive input event for one device at one tick.
///
/// Values are only produced through the checked constructors below, so a
/// stored action always satisfies the range rules of its variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    Pause {
        duration: u64,
    },
    KeyDown {
        #[serde(rename = "value")]
        key: Key,
    },
    KeyUp {
        #[serde(rename = "value")]
        key: Key,
    },
    PointerDown {
        button: u64,
    },
    PointerUp {
        button: u64,
    },
    PointerMove {
        duration: u64,
        x: i64,
        y: i64,
        origin: Origin,
    },
    PointerCancel,
}

impl Action {
    pub fn pause(duration: u64) -> Self {
        Action::Pause { duration }
    }

    pub fn key_down(key: Key) -> Self {
        Action::KeyDown { key }
    }

    pub fn key_up(key: Key) -> Self {
        Action::KeyUp { key }
    }

    pub fn pointer_down(button: i64) -> Result<Self, ActionError> {
        Ok(Action::PointerDown {
            button: check_button(button)?,
        })
    }

    pub fn pointer_up(button: i64) -> Result<Self, ActionError> {
        Ok(Action::PointerUp {
            button: check_button(button)?,
        })
    }

    /// Build a move, rejecting negative durations and negative absolute
    /// coordinates. Element- and pointer-relative offsets are signed.
    pub fn pointer_move(duration: i64, x: i64, y: i64, origin: Origin) -> Result<Self, ActionError> {
        if duration < 0 {
            return Err(ActionError::validation(format!(
                "duration value cannot be negative (got {})",
                duration
            )));
        }
        if origin == Origin::Viewport {
            if x < 0 {
                return Err(ActionError::validation(format!(
                    "x value cannot be negative (got {})",
                    x
                )));
            }
            if y < 0 {
                return Err(ActionError::validation(format!(
                    "y value cannot be negative (got {})",
                    y
                )));
            }
        }
        Ok(Action::PointerMove {
            duration: duration as u64,
            x,
            y,
            origin,
        })
    }

    pub fn pointer_cancel() -> Self {
        Action::PointerCancel
    }

    pub fn is_pause(&self) -> bool {
        matches!(self, Action::Pause { .. })
    }

    /// Device kind that may carry this action; `None` for pauses.
    pub fn required_kind(&self) -> Option<DeviceKind> {
        match self {
            Action::Pause { .. } => None,
            Action::KeyDown { .. } | Action::KeyUp { .. } => Some(DeviceKind::Key),
            Action::PointerDown { .. }
            | Action::PointerUp { .. }
            | Action::PointerMove { .. }
            | Action::PointerCancel => Some(DeviceKind::Pointer),
        }
    }

    /// Wire name of the action subtype
    pub fn subtype(&self) -> &'static str {
        match self {
            Action::Pause { .. } => "pause",
            Action::KeyDown { .. } => "keyDown",
            Action::KeyUp { .. } => "keyUp",
            Action::PointerDown { .. } => "pointerDown",
            Action::PointerUp { .. } => "pointerUp",
            Action::PointerMove { .. } => "pointerMove",
            Action::PointerCancel => "pointerCancel",
        }
    }
}

fn check_button(button: i64) -> Result<u64, ActionError> {
    if button < 0 {
        return Err(ActionError::validation(format!(
            "button number cannot be negative (got {})",
            button
        )));
    }
    Ok(button as u64)
}
