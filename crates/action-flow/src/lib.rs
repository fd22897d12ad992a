//! Action Sequence Builder
//!
//! Turns gestures (click, drag, type, move) into per-device timelines that
//! stay tick-aligned across every registered input source, encodes them in
//! the W3C actions wire format and submits them through a transport.

pub mod builder;
pub mod errors;
pub mod gestures;
pub mod registry;
pub mod types;

pub use builder::ActionSequenceBuilder;
pub use errors::{FlowError, FlowResult};
pub use registry::DeviceRegistry;
pub use types::{
    BuilderOptions, SequenceState, DEFAULT_KEYBOARD_ID, DEFAULT_MOVE_DURATION_MS,
    DEFAULT_POINTER_ID,
};
