//! Input sources and primitive actions for W3C WebDriver action sequences
//!
//! This crate provides the building blocks the sequence builder composes:
//! - Primitive actions (pause, key, pointer) with range checks
//! - Key and pointer input sources, each owning a per-device timeline
//! - Key name normalization to single code points
//! - The wire shapes a remote end consumes

pub mod devices;
pub mod errors;
pub mod keys;
pub mod types;
pub mod wire;

pub use devices::*;
pub use errors::*;
pub use keys::*;
pub use types::*;
pub use wire::*;
