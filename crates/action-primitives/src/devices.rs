//! Input sources and their per-device timelines

use tracing::trace;

use crate::errors::ActionError;
use crate::keys::Key;
use crate::types::{Action, DeviceKind, Origin, PointerKind};
use crate::wire::{EncodedDevice, PointerParameters};

/// Keyboard input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    id: String,
    timeline: Vec<Action>,
}

impl KeyInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timeline: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Pointer input source (mouse, pen or touch)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerInput {
    id: String,
    kind: PointerKind,
    primary: bool,
    timeline: Vec<Action>,
}

impl PointerInput {
    pub fn new(kind: PointerKind, id: impl Into<String>, primary: bool) -> Self {
        Self {
            id: id.into(),
            kind,
            primary,
            timeline: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> PointerKind {
        self.kind
    }

    pub fn timeline(&self) -> &[Action] {
        &self.timeline
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn set_primary(&mut self, primary: bool) {
        self.primary = primary;
    }
}

/// An input source with its timeline.
///
/// The set of device kinds is closed; every kind-specific rule below is a
/// match over this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDevice {
    Key(KeyInput),
    Pointer(PointerInput),
}

impl From<KeyInput> for InputDevice {
    fn from(device: KeyInput) -> Self {
        InputDevice::Key(device)
    }
}

impl From<PointerInput> for InputDevice {
    fn from(device: PointerInput) -> Self {
        InputDevice::Pointer(device)
    }
}

impl InputDevice {
    pub fn key(id: impl Into<String>) -> Self {
        InputDevice::Key(KeyInput::new(id))
    }

    pub fn pointer(kind: PointerKind, id: impl Into<String>, primary: bool) -> Self {
        InputDevice::Pointer(PointerInput::new(kind, id, primary))
    }

    pub fn id(&self) -> &str {
        match self {
            InputDevice::Key(device) => &device.id,
            InputDevice::Pointer(device) => &device.id,
        }
    }

    pub fn kind(&self) -> DeviceKind {
        match self {
            InputDevice::Key(_) => DeviceKind::Key,
            InputDevice::Pointer(_) => DeviceKind::Pointer,
        }
    }

    pub fn timeline(&self) -> &[Action] {
        match self {
            InputDevice::Key(device) => &device.timeline,
            InputDevice::Pointer(device) => &device.timeline,
        }
    }

    pub fn len(&self) -> usize {
        self.timeline().len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline().is_empty()
    }

    pub fn as_pointer(&self) -> Option<&PointerInput> {
        match self {
            InputDevice::Pointer(device) => Some(device),
            InputDevice::Key(_) => None,
        }
    }

    pub fn as_pointer_mut(&mut self) -> Option<&mut PointerInput> {
        match self {
            InputDevice::Pointer(device) => Some(device),
            InputDevice::Key(_) => None,
        }
    }

    pub fn is_primary_pointer(&self) -> bool {
        self.as_pointer().map_or(false, PointerInput::is_primary)
    }

    pub fn create_key_down(&mut self, key: Key) -> Result<(), ActionError> {
        self.add_action(Action::key_down(key))
    }

    pub fn create_key_up(&mut self, key: Key) -> Result<(), ActionError> {
        self.add_action(Action::key_up(key))
    }

    pub fn create_pointer_down(&mut self, button: i64) -> Result<(), ActionError> {
        self.add_action(Action::pointer_down(button)?)
    }

    pub fn create_pointer_up(&mut self, button: i64) -> Result<(), ActionError> {
        self.add_action(Action::pointer_up(button)?)
    }

    /// Append a move. `x` and `y` must be non-negative against the viewport;
    /// against the element or the current pointer position they are signed
    /// offsets. Duration is never negative.
    pub fn create_pointer_move(
        &mut self,
        duration: i64,
        x: i64,
        y: i64,
        origin: Origin,
    ) -> Result<(), ActionError> {
        self.add_action(Action::pointer_move(duration, x, y, origin)?)
    }

    pub fn create_pointer_cancel(&mut self) -> Result<(), ActionError> {
        self.add_action(Action::pointer_cancel())
    }

    pub fn create_pause(&mut self, duration: u64) {
        self.timeline_mut().push(Action::pause(duration));
    }

    /// Append an already-built action after checking it fits this device.
    pub fn add_action(&mut self, action: Action) -> Result<(), ActionError> {
        if let Some(required) = action.required_kind() {
            if required != self.kind() {
                return Err(ActionError::validation(format!(
                    "{} is not valid on {} device {:?}",
                    action.subtype(),
                    self.kind(),
                    self.id()
                )));
            }
        }
        trace!(device = %self.id(), action = action.subtype(), "appending action");
        self.timeline_mut().push(action);
        Ok(())
    }

    /// Append pauses until the timeline holds `ticks` entries.
    pub fn pad_to(&mut self, ticks: usize) -> usize {
        let missing = ticks.saturating_sub(self.len());
        for _ in 0..missing {
            self.create_pause(0);
        }
        missing
    }

    pub fn clear_actions(&mut self) {
        self.timeline_mut().clear();
    }

    /// Wire form of the device; `None` when nothing was recorded.
    pub fn encode(&self) -> Option<EncodedDevice> {
        if self.is_empty() {
            return None;
        }
        let parameters = self.as_pointer().map(|pointer| PointerParameters {
            pointer_type: pointer.kind,
            primary: pointer.primary,
        });
        Some(EncodedDevice {
            kind: self.kind(),
            id: self.id().to_string(),
            parameters,
            actions: self.timeline().to_vec(),
        })
    }

    fn timeline_mut(&mut self) -> &mut Vec<Action> {
        match self {
            InputDevice::Key(device) => &mut device.timeline,
            InputDevice::Pointer(device) => &mut device.timeline,
        }
    }
}
