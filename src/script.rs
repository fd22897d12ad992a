//! Gesture scripts
//!
//! A script is a YAML list of steps, each tagged with `op`, replayed in
//! order against a sequence builder:
//!
//! ```yaml
//! - op: click
//!   element: { id: "submit", size: { width: 80, height: 24 } }
//! - op: send_keys
//!   text: "hello"
//! - op: perform
//! ```

use action_flow::{ActionSequenceBuilder, FlowError};
use action_primitives::PointerKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use wd_core_types::ElementRef;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("step {index} ({op}) failed: {source}")]
    Step {
        index: usize,
        op: &'static str,
        #[source]
        source: FlowError,
    },
}

/// One scripted builder call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GestureStep {
    AddPointer {
        id: String,
        #[serde(default)]
        kind: PointerKind,
        #[serde(default)]
        primary: bool,
    },
    AddKeyboard {
        id: String,
    },
    SetPrimaryPointer {
        id: String,
    },
    MoveTo {
        element: ElementRef,
        offset_x: Option<i64>,
        offset_y: Option<i64>,
        pointer: Option<String>,
    },
    MoveBy {
        dx: i64,
        dy: i64,
        pointer: Option<String>,
    },
    MoveToLocation {
        x: i64,
        y: i64,
        pointer: Option<String>,
    },
    PointerDown {
        #[serde(default)]
        button: i64,
        pointer: Option<String>,
    },
    PointerUp {
        #[serde(default)]
        button: i64,
        pointer: Option<String>,
    },
    PointerCancel {
        pointer: Option<String>,
    },
    Click {
        element: Option<ElementRef>,
        pointer: Option<String>,
    },
    DoubleClick {
        element: Option<ElementRef>,
        pointer: Option<String>,
    },
    ContextClick {
        element: Option<ElementRef>,
        pointer: Option<String>,
    },
    ClickAndHold {
        element: Option<ElementRef>,
        pointer: Option<String>,
    },
    Release {
        pointer: Option<String>,
    },
    DragAndDrop {
        source: ElementRef,
        target: ElementRef,
        pointer: Option<String>,
    },
    KeyDown {
        key: String,
        element: Option<ElementRef>,
    },
    KeyUp {
        key: String,
        element: Option<ElementRef>,
    },
    SendKeys {
        text: String,
        element: Option<ElementRef>,
    },
    Perform,
    ReleaseActions,
}

impl GestureStep {
    pub fn op(&self) -> &'static str {
        match self {
            GestureStep::AddPointer { .. } => "add_pointer",
            GestureStep::AddKeyboard { .. } => "add_keyboard",
            GestureStep::SetPrimaryPointer { .. } => "set_primary_pointer",
            GestureStep::MoveTo { .. } => "move_to",
            GestureStep::MoveBy { .. } => "move_by",
            GestureStep::MoveToLocation { .. } => "move_to_location",
            GestureStep::PointerDown { .. } => "pointer_down",
            GestureStep::PointerUp { .. } => "pointer_up",
            GestureStep::PointerCancel { .. } => "pointer_cancel",
            GestureStep::Click { .. } => "click",
            GestureStep::DoubleClick { .. } => "double_click",
            GestureStep::ContextClick { .. } => "context_click",
            GestureStep::ClickAndHold { .. } => "click_and_hold",
            GestureStep::Release { .. } => "release",
            GestureStep::DragAndDrop { .. } => "drag_and_drop",
            GestureStep::KeyDown { .. } => "key_down",
            GestureStep::KeyUp { .. } => "key_up",
            GestureStep::SendKeys { .. } => "send_keys",
            GestureStep::Perform => "perform",
            GestureStep::ReleaseActions => "release_actions",
        }
    }

    /// Replay this step against `builder`.
    pub async fn apply(&self, builder: &mut ActionSequenceBuilder) -> Result<(), FlowError> {
        match self {
            GestureStep::AddPointer { id, kind, primary } => {
                builder.add_pointer_input(*kind, id, *primary)?;
            }
            GestureStep::AddKeyboard { id } => {
                builder.add_key_input(id)?;
            }
            GestureStep::SetPrimaryPointer { id } => {
                builder.set_primary_pointer(id)?;
            }
            GestureStep::MoveTo {
                element,
                offset_x,
                offset_y,
                pointer,
            } => {
                builder.move_to(element, *offset_x, *offset_y, pointer.as_deref())?;
            }
            GestureStep::MoveBy { dx, dy, pointer } => {
                builder.move_by(*dx, *dy, pointer.as_deref())?;
            }
            GestureStep::MoveToLocation { x, y, pointer } => {
                builder.move_to_location(*x, *y, pointer.as_deref())?;
            }
            GestureStep::PointerDown { button, pointer } => {
                builder.pointer_down(*button, pointer.as_deref())?;
            }
            GestureStep::PointerUp { button, pointer } => {
                builder.pointer_up(*button, pointer.as_deref())?;
            }
            GestureStep::PointerCancel { pointer } => {
                builder.pointer_cancel(pointer.as_deref())?;
            }
            GestureStep::Click { element, pointer } => {
                builder.click(element.as_ref(), pointer.as_deref())?;
            }
            GestureStep::DoubleClick { element, pointer } => {
                builder.double_click(element.as_ref(), pointer.as_deref())?;
            }
            GestureStep::ContextClick { element, pointer } => {
                builder.context_click(element.as_ref(), pointer.as_deref())?;
            }
            GestureStep::ClickAndHold { element, pointer } => {
                builder.click_and_hold(element.as_ref(), pointer.as_deref())?;
            }
            GestureStep::Release { pointer } => {
                builder.release(pointer.as_deref())?;
            }
            GestureStep::DragAndDrop {
                source,
                target,
                pointer,
            } => {
                builder.drag_and_drop(source, target, pointer.as_deref())?;
            }
            GestureStep::KeyDown { key, element } => match element {
                Some(element) => {
                    builder.key_down_on(element, key)?;
                }
                None => {
                    builder.key_down(key)?;
                }
            },
            GestureStep::KeyUp { key, element } => match element {
                Some(element) => {
                    builder.key_up_on(element, key)?;
                }
                None => {
                    builder.key_up(key)?;
                }
            },
            GestureStep::SendKeys { text, element } => match element {
                Some(element) => {
                    builder.send_keys_to(element, text)?;
                }
                None => {
                    builder.send_keys(text)?;
                }
            },
            GestureStep::Perform => builder.perform().await?,
            GestureStep::ReleaseActions => builder.release_actions().await?,
        }
        Ok(())
    }
}

pub fn parse_script(content: &str) -> Result<Vec<GestureStep>, ScriptError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Replay every step in order, stopping at the first failure.
pub async fn run_script(
    builder: &mut ActionSequenceBuilder,
    steps: &[GestureStep],
) -> Result<(), ScriptError> {
    for (index, step) in steps.iter().enumerate() {
        debug!(index, op = step.op(), "applying script step");
        step.apply(builder)
            .await
            .map_err(|source| ScriptError::Step {
                index,
                op: step.op(),
                source,
            })?;
    }
    Ok(())
}
