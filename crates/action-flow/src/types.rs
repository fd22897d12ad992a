//! Builder options and lifecycle state

use action_primitives::PointerKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_KEYBOARD_ID: &str = "keyboard";
pub const DEFAULT_POINTER_ID: &str = "mouse";

/// Duration used for every pointer move a gesture emits
pub const DEFAULT_MOVE_DURATION_MS: i64 = 0;

/// Construction-time settings of a sequence builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Skip tick padding; the caller owns alignment
    pub async_mode: bool,

    /// Id of the default keyboard
    pub keyboard_id: String,

    /// Id of the default (primary) pointer
    pub pointer_id: String,

    /// Kind of the default pointer
    pub pointer_kind: PointerKind,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            async_mode: false,
            keyboard_id: DEFAULT_KEYBOARD_ID.to_string(),
            pointer_id: DEFAULT_POINTER_ID.to_string(),
            pointer_kind: PointerKind::Mouse,
        }
    }
}

/// Where a builder is in its perform cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceState {
    /// No ticks recorded
    Empty,

    /// Gestures recorded, not yet performed
    Building,

    /// The last cycle was submitted and nothing was recorded since
    Performed,
}
