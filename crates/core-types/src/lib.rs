use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Key under which a remote end expects a web element reference.
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Error raised when a shared value cannot be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreTypeError {
    #[error("element id must not be empty")]
    EmptyElementId,
    #[error("element size must be non-negative (got {width}x{height})")]
    NegativeSize { width: i64, height: i64 },
}

/// Correlation id for one perform cycle of an action sequence.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SequenceId(pub String);

impl SequenceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rendered size of a remote element, in CSS pixels.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ElementSize {
    pub width: i64,
    pub height: i64,
}

impl ElementSize {
    pub fn new(width: i64, height: i64) -> Result<Self, CoreTypeError> {
        if width < 0 || height < 0 {
            return Err(CoreTypeError::NegativeSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn half_width(&self) -> i64 {
        self.width / 2
    }

    pub fn half_height(&self) -> i64 {
        self.height / 2
    }
}

/// Handle to an element that lives on the remote end.
///
/// Element lookup happens elsewhere; this layer only needs the opaque id
/// (for the wire reference) and the layout size (to turn top-left offsets
/// into the center-relative offsets the protocol uses).
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementRef {
    pub id: String,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub size: ElementSize,
}

impl ElementRef {
    pub fn new(id: impl Into<String>, size: ElementSize) -> Result<Self, CoreTypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreTypeError::EmptyElementId);
        }
        Ok(Self { id, size })
    }

    /// Reference object understood by the remote end.
    #[cfg(feature = "serde-full")]
    pub fn to_wire(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(
            W3C_ELEMENT_KEY.to_string(),
            serde_json::Value::String(self.id.clone()),
        );
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "element={} size={}x{}",
            self.id, self.size.width, self.size.height
        )
    }
}
