//! Wire representation of an action set

use serde::Serialize;

use crate::types::{Action, DeviceKind, PointerKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerParameters {
    pub pointer_type: PointerKind,
    pub primary: bool,
}

/// One device entry of the payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedDevice {
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<PointerParameters>,
    pub actions: Vec<Action>,
}

/// Body submitted to the remote end for one perform cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionsPayload {
    pub actions: Vec<EncodedDevice>,
}

impl ActionsPayload {
    pub fn new(actions: Vec<EncodedDevice>) -> Self {
        Self { actions }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of device entries
    pub fn device_count(&self) -> usize {
        self.actions.len()
    }

    /// Longest device timeline in the payload
    pub fn tick_count(&self) -> usize {
        self.actions
            .iter()
            .map(|device| device.actions.len())
            .max()
            .unwrap_or(0)
    }

    /// True when every device entry covers the same number of ticks.
    pub fn is_aligned(&self) -> bool {
        let ticks = self.tick_count();
        self.actions.iter().all(|device| device.actions.len() == ticks)
    }

    pub fn device(&self, id: &str) -> Option<&EncodedDevice> {
        self.actions.iter().find(|device| device.id == id)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
