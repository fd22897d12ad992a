//! wd-actions library
//!
//! Re-exports the action sequence builder and its building blocks, plus the
//! configuration and gesture-script layers used by the binary.

pub mod config;
pub mod script;

pub use action_flow::{
    ActionSequenceBuilder, BuilderOptions, DeviceRegistry, FlowError, FlowResult, SequenceState,
};
pub use action_primitives::{
    Action, ActionError, ActionsPayload, DeviceKind, EncodedDevice, InputDevice, IntoKey, Key,
    KeyInput, MouseButton, NamedKey, Origin, PointerInput, PointerKind,
};
pub use config::{ActionsConfig, ConfigError};
pub use script::{GestureStep, ScriptError};
pub use wd_bridge::{
    ActionsTransport, NoopTransport, RecordingTransport, TransportCall, TransportError,
};
pub use wd_core_types::{ElementRef, ElementSize, SequenceId, W3C_ELEMENT_KEY};
