//! Ordered registry of input devices

use action_primitives::{ActionError, DeviceKind, InputDevice, PointerInput};

/// Devices keyed by id, in registration order.
///
/// Pointer and key views are filters over the same storage. The primary
/// pointer is cached as an index and refreshed on every change to primary
/// status.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: Vec<InputDevice>,
    primary: Option<usize>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.devices.iter().position(|device| device.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&InputDevice> {
        self.devices.iter().find(|device| device.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputDevice> {
        self.devices.iter()
    }

    pub fn pointer_inputs(&self) -> impl Iterator<Item = &PointerInput> {
        self.devices.iter().filter_map(InputDevice::as_pointer)
    }

    pub fn key_inputs(&self) -> impl Iterator<Item = &InputDevice> {
        self.devices
            .iter()
            .filter(|device| device.kind() == DeviceKind::Key)
    }

    /// Longest timeline across all devices
    pub fn max_ticks(&self) -> usize {
        self.devices.iter().map(InputDevice::len).max().unwrap_or(0)
    }

    pub fn primary_index(&self) -> Option<usize> {
        self.primary
    }

    pub fn primary_pointer(&self) -> Option<&PointerInput> {
        self.primary
            .and_then(|idx| self.devices.get(idx))
            .and_then(InputDevice::as_pointer)
    }

    /// Add a device at the end of the registry.
    ///
    /// A pointer registered as primary demotes every other pointer.
    pub fn insert(&mut self, device: InputDevice) -> Result<usize, ActionError> {
        if self.contains(device.id()) {
            return Err(ActionError::configuration(format!(
                "device id {:?} is already registered",
                device.id()
            )));
        }
        let promote = device.is_primary_pointer();
        self.devices.push(device);
        let idx = self.devices.len() - 1;
        if promote {
            self.promote(idx);
        }
        Ok(idx)
    }

    /// Make the pointer with `id` the primary one.
    pub fn set_primary(&mut self, id: &str) -> Result<usize, ActionError> {
        let idx = self.index_of(id).ok_or_else(|| {
            ActionError::configuration(format!("no device registered as {:?}", id))
        })?;
        if self.devices[idx].kind() != DeviceKind::Pointer {
            return Err(ActionError::configuration(format!(
                "device {:?} is not a pointer",
                id
            )));
        }
        self.promote(idx);
        Ok(idx)
    }

    pub(crate) fn device_mut(&mut self, idx: usize) -> Option<&mut InputDevice> {
        self.devices.get_mut(idx)
    }

    pub(crate) fn device_at(&self, idx: usize) -> Option<&InputDevice> {
        self.devices.get(idx)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut InputDevice> {
        self.devices.iter_mut()
    }

    fn promote(&mut self, idx: usize) {
        for (pos, device) in self.devices.iter_mut().enumerate() {
            if let Some(pointer) = device.as_pointer_mut() {
                pointer.set_primary(pos == idx);
            }
        }
        self.primary = Some(idx);
    }
}
