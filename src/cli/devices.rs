use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use wd_actions::config::ActionsConfig;
use wd_actions::{ActionSequenceBuilder, InputDevice, NoopTransport};

/// Print the device set a builder starts with under `config`.
pub async fn cmd_devices(config: &ActionsConfig) -> Result<()> {
    let builder = ActionSequenceBuilder::with_options(Arc::new(NoopTransport), &config.builder_options());
    let devices: Vec<_> = builder
        .devices()
        .map(|device| match device {
            InputDevice::Key(key) => json!({ "type": "key", "id": key.id() }),
            InputDevice::Pointer(pointer) => json!({
                "type": "pointer",
                "id": pointer.id(),
                "pointerType": pointer.kind(),
                "primary": pointer.is_primary(),
            }),
        })
        .collect();
    let summary = json!({
        "async": builder.is_async(),
        "devices": devices,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
