//! Action sequence builder: device registry, tick synchronization and the
//! perform cycle

use std::sync::Arc;

use action_primitives::{
    Action, ActionError, ActionsPayload, DeviceKind, InputDevice, PointerInput, PointerKind,
};
use tracing::{debug, info, warn, Instrument};
use wd_bridge::{ActionsTransport, TransportTracer};
use wd_core_types::SequenceId;

use crate::errors::FlowResult;
use crate::registry::DeviceRegistry;
use crate::types::{BuilderOptions, SequenceState};

/// Composes gestures into a tick-aligned action set and submits it.
///
/// Every primitive append to one device is matched by a `Pause(0)` on every
/// other device, so index `i` of all timelines forms tick `i`. Builders
/// created in async mode skip that padding.
pub struct ActionSequenceBuilder {
    registry: DeviceRegistry,
    async_mode: bool,
    performed: bool,
    transport: Arc<dyn ActionsTransport>,
    tracer: TransportTracer,
}

impl ActionSequenceBuilder {
    /// Builder with the default pointer ("mouse", primary) and keyboard.
    pub fn new(transport: Arc<dyn ActionsTransport>) -> Self {
        Self::with_async(transport, false)
    }

    pub fn with_async(transport: Arc<dyn ActionsTransport>, async_mode: bool) -> Self {
        let options = BuilderOptions {
            async_mode,
            ..BuilderOptions::default()
        };
        Self::with_options(transport, &options)
    }

    pub fn with_options(transport: Arc<dyn ActionsTransport>, options: &BuilderOptions) -> Self {
        let mut registry = DeviceRegistry::new();
        let defaults = [
            InputDevice::pointer(options.pointer_kind, options.pointer_id.clone(), true),
            InputDevice::key(options.keyboard_id.clone()),
        ];
        for device in defaults {
            // a clash between the two configured ids keeps the pointer only
            if let Err(err) = registry.insert(device) {
                warn!(error = %err, "skipping default device");
            }
        }
        Self::from_registry(transport, registry, options.async_mode)
    }

    /// Builder over an explicit device set, registered in the given order.
    pub fn with_devices(
        transport: Arc<dyn ActionsTransport>,
        async_mode: bool,
        devices: Vec<InputDevice>,
    ) -> FlowResult<Self> {
        let mut builder = Self::from_registry(transport, DeviceRegistry::new(), async_mode);
        for device in devices {
            builder.register(device)?;
        }
        Ok(builder)
    }

    fn from_registry(
        transport: Arc<dyn ActionsTransport>,
        registry: DeviceRegistry,
        async_mode: bool,
    ) -> Self {
        Self {
            registry,
            async_mode,
            performed: false,
            transport,
            tracer: TransportTracer::default(),
        }
    }

    pub fn is_async(&self) -> bool {
        self.async_mode
    }

    pub fn devices(&self) -> impl Iterator<Item = &InputDevice> {
        self.registry.iter()
    }

    pub fn device(&self, id: &str) -> Option<&InputDevice> {
        self.registry.get(id)
    }

    pub fn pointer_inputs(&self) -> impl Iterator<Item = &PointerInput> {
        self.registry.pointer_inputs()
    }

    pub fn key_inputs(&self) -> impl Iterator<Item = &InputDevice> {
        self.registry.key_inputs()
    }

    pub fn primary_pointer(&self) -> Option<&PointerInput> {
        self.registry.primary_pointer()
    }

    /// Number of ticks recorded so far (longest timeline)
    pub fn tick_count(&self) -> usize {
        self.registry.max_ticks()
    }

    pub fn state(&self) -> SequenceState {
        if self.tick_count() > 0 {
            SequenceState::Building
        } else if self.performed {
            SequenceState::Performed
        } else {
            SequenceState::Empty
        }
    }

    pub fn add_pointer_input(
        &mut self,
        kind: PointerKind,
        id: &str,
        primary: bool,
    ) -> FlowResult<&mut Self> {
        self.register(InputDevice::pointer(kind, id, primary))?;
        Ok(self)
    }

    pub fn add_key_input(&mut self, id: &str) -> FlowResult<&mut Self> {
        self.register(InputDevice::key(id))?;
        Ok(self)
    }

    pub fn set_primary_pointer(&mut self, id: &str) -> FlowResult<&mut Self> {
        self.registry.set_primary(id)?;
        debug!(pointer = id, "primary pointer changed");
        Ok(self)
    }

    /// Register an empty device, first padding it to the ticks already
    /// recorded. Devices that already hold actions are rejected.
    pub fn register(&mut self, mut device: InputDevice) -> FlowResult<()> {
        if self.registry.contains(device.id()) {
            return Err(ActionError::configuration(format!(
                "device id {:?} is already registered",
                device.id()
            ))
            .into());
        }
        if !device.is_empty() {
            return Err(ActionError::configuration(format!(
                "device {:?} already holds {} actions",
                device.id(),
                device.len()
            ))
            .into());
        }
        let padded = device.pad_to(self.registry.max_ticks());
        debug!(
            device = device.id(),
            kind = %device.kind(),
            padded,
            "registering input device"
        );
        self.registry.insert(device)?;
        Ok(())
    }

    /// Resolve an explicit pointer id, or the primary pointer when `None`.
    pub(crate) fn resolve_pointer(&self, pointer: Option<&str>) -> FlowResult<usize> {
        match pointer {
            Some(id) => {
                let idx = self.registry.index_of(id).ok_or_else(|| {
                    ActionError::configuration(format!("no device registered as {:?}", id))
                })?;
                match self.registry.device_at(idx).and_then(InputDevice::as_pointer) {
                    Some(_) => Ok(idx),
                    None => Err(ActionError::configuration(format!(
                        "device {:?} is not a pointer",
                        id
                    ))
                    .into()),
                }
            }
            None => self.registry.primary_index().ok_or_else(|| {
                ActionError::configuration("no primary pointer is registered").into()
            }),
        }
    }

    pub(crate) fn resolve_keyboard(&self) -> FlowResult<usize> {
        self.registry
            .iter()
            .position(|device| device.kind() == DeviceKind::Key)
            .ok_or_else(|| ActionError::configuration("no key input is registered").into())
    }

    /// Append one action to the device at `idx`, then pad the others.
    pub(crate) fn append(&mut self, idx: usize, action: Action) -> FlowResult<()> {
        let device = self.registry.device_mut(idx).ok_or_else(|| {
            ActionError::configuration(format!("no device at registry slot {}", idx))
        })?;
        let subtype = action.subtype();
        device.add_action(action)?;
        debug!(device = device.id(), action = subtype, "action appended");
        self.performed = false;
        self.synchronize(idx);
        Ok(())
    }

    fn synchronize(&mut self, source: usize) {
        if self.async_mode {
            return;
        }
        for (pos, device) in self.registry.iter_mut().enumerate() {
            if pos != source {
                device.create_pause(0);
            }
        }
    }

    /// Wire payload for the current action set, empty devices omitted.
    pub fn encode(&self) -> ActionsPayload {
        ActionsPayload::new(self.registry.iter().filter_map(InputDevice::encode).collect())
    }

    /// Drop every recorded action; the device set is kept.
    pub fn clear_actions(&mut self) {
        for device in self.registry.iter_mut() {
            device.clear_actions();
        }
    }

    /// Submit the action set and start a fresh cycle.
    ///
    /// On transport failure the recorded actions stay in place.
    pub async fn perform(&mut self) -> FlowResult<()> {
        let payload = self.encode();
        let sequence = SequenceId::new();
        let span = self.tracer.span("perform");
        info!(
            sequence = %sequence,
            devices = payload.device_count(),
            ticks = payload.tick_count(),
            "performing action sequence"
        );

        if let Err(err) = self
            .transport
            .send_actions(&payload)
            .instrument(span)
            .await
        {
            warn!(sequence = %sequence, error = %err, "transport rejected action sequence");
            return Err(err.into());
        }

        self.clear_actions();
        self.performed = true;
        Ok(())
    }

    /// Ask the remote end to release every held key and button.
    pub async fn release_actions(&self) -> FlowResult<()> {
        let span = self.tracer.span("release_actions");
        self.transport
            .release_actions()
            .instrument(span)
            .await
            .map_err(|err| {
                warn!(error = %err, "transport failed to release actions");
                err.into()
            })
    }
}

impl std::fmt::Debug for ActionSequenceBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSequenceBuilder")
            .field("registry", &self.registry)
            .field("async_mode", &self.async_mode)
            .field("performed", &self.performed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_primitives::{Key, NamedKey};
    use wd_bridge::{NoopTransport, RecordingTransport, TransportError};

    fn recording() -> (Arc<RecordingTransport>, ActionSequenceBuilder) {
        let transport = Arc::new(RecordingTransport::new());
        let builder = ActionSequenceBuilder::new(transport.clone());
        (transport, builder)
    }

    fn lengths(builder: &ActionSequenceBuilder) -> Vec<usize> {
        builder.devices().map(InputDevice::len).collect()
    }

    #[test]
    fn defaults_are_a_primary_mouse_and_a_keyboard() {
        let builder = ActionSequenceBuilder::new(Arc::new(NoopTransport));
        let ids: Vec<_> = builder.devices().map(InputDevice::id).collect();
        assert_eq!(ids, vec!["mouse", "keyboard"]);
        assert_eq!(builder.primary_pointer().map(PointerInput::id), Some("mouse"));
        assert!(!builder.is_async());
        assert_eq!(builder.state(), SequenceState::Empty);
    }

    #[test]
    fn append_pads_every_other_device() {
        let (_, mut builder) = recording();
        let keyboard = builder.resolve_keyboard().unwrap();
        builder
            .append(keyboard, Action::key_down(Key::Named(NamedKey::Shift)))
            .unwrap();
        assert_eq!(lengths(&builder), vec![1, 1]);
        assert_eq!(builder.device("mouse").unwrap().timeline(), &[Action::pause(0)]);
        assert_eq!(builder.state(), SequenceState::Building);
    }

    #[test]
    fn async_builder_does_not_pad() {
        let mut builder = ActionSequenceBuilder::with_async(Arc::new(NoopTransport), true);
        let keyboard = builder.resolve_keyboard().unwrap();
        builder.append(keyboard, Action::key_down(Key::Char('a'))).unwrap();
        assert_eq!(lengths(&builder), vec![0, 1]);
        assert_eq!(builder.encode().device_count(), 1);
    }

    #[test]
    fn rejected_append_changes_nothing() {
        let (_, mut builder) = recording();
        let keyboard = builder.resolve_keyboard().unwrap();
        let err = builder
            .append(keyboard, Action::pointer_cancel())
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(lengths(&builder), vec![0, 0]);
    }

    #[test]
    fn late_device_is_padded_to_current_ticks() {
        let (_, mut builder) = recording();
        let keyboard = builder.resolve_keyboard().unwrap();
        builder.append(keyboard, Action::key_down(Key::Char('a'))).unwrap();
        builder.append(keyboard, Action::key_up(Key::Char('a'))).unwrap();

        builder
            .add_pointer_input(PointerKind::Touch, "finger", false)
            .unwrap();
        let finger = builder.device("finger").unwrap();
        assert_eq!(finger.timeline(), &[Action::pause(0), Action::pause(0)]);
        assert_eq!(lengths(&builder), vec![2, 2, 2]);
    }

    #[test]
    fn device_with_recorded_actions_is_rejected() {
        let (_, mut builder) = recording();
        let keyboard = builder.resolve_keyboard().unwrap();
        builder.append(keyboard, Action::key_down(Key::Char('a'))).unwrap();
        builder.append(keyboard, Action::key_up(Key::Char('a'))).unwrap();

        let mut pen = InputDevice::pointer(PointerKind::Pen, "pen", false);
        pen.create_pointer_down(0).unwrap();
        assert!(builder.register(pen).unwrap_err().is_configuration());

        let mut finger = InputDevice::pointer(PointerKind::Touch, "finger", false);
        for _ in 0..5 {
            finger.create_pause(0);
        }
        assert!(builder.register(finger).unwrap_err().is_configuration());

        assert!(builder.device("pen").is_none());
        assert!(builder.device("finger").is_none());
        assert_eq!(lengths(&builder), vec![2, 2]);
        assert!(builder.encode().is_aligned());
    }

    #[test]
    fn with_devices_rejects_prefilled_devices() {
        let mut keyboard = InputDevice::key("keyboard");
        keyboard.create_key_down(Key::Char('x')).unwrap();
        let err = ActionSequenceBuilder::with_devices(
            Arc::new(NoopTransport),
            false,
            vec![InputDevice::pointer(PointerKind::Mouse, "mouse", true), keyboard],
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn duplicate_registration_is_a_configuration_error() {
        let (_, mut builder) = recording();
        let err = builder.add_key_input("mouse").unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(builder.devices().count(), 2);
    }

    #[test]
    fn pointer_resolution_without_primary_fails() {
        let builder = ActionSequenceBuilder::with_devices(
            Arc::new(NoopTransport),
            false,
            vec![
                InputDevice::key("keyboard"),
                InputDevice::pointer(PointerKind::Pen, "pen", false),
            ],
        )
        .unwrap();
        assert!(builder.resolve_pointer(None).unwrap_err().is_configuration());
        assert_eq!(builder.resolve_pointer(Some("pen")).unwrap(), 1);
        assert!(builder
            .resolve_pointer(Some("keyboard"))
            .unwrap_err()
            .is_configuration());
    }

    #[tokio::test]
    async fn perform_submits_then_clears() {
        let (transport, mut builder) = recording();
        let keyboard = builder.resolve_keyboard().unwrap();
        builder.append(keyboard, Action::key_down(Key::Char('z'))).unwrap();

        builder.perform().await.unwrap();
        assert_eq!(lengths(&builder), vec![0, 0]);
        assert_eq!(builder.state(), SequenceState::Performed);

        let payload = transport.last_payload().unwrap();
        assert_eq!(payload.device_count(), 2);
        assert!(payload.is_aligned());
    }

    #[tokio::test]
    async fn failed_perform_keeps_timelines() {
        let (transport, mut builder) = recording();
        transport.fail_next(TransportError::NoSuchSession);
        let keyboard = builder.resolve_keyboard().unwrap();
        builder.append(keyboard, Action::key_down(Key::Char('z'))).unwrap();

        let err = builder.perform().await.unwrap_err();
        assert_eq!(err, crate::FlowError::Transport(TransportError::NoSuchSession));
        assert_eq!(lengths(&builder), vec![1, 1]);
    }

    #[tokio::test]
    async fn release_is_forwarded_without_touching_timelines() {
        let (transport, mut builder) = recording();
        let keyboard = builder.resolve_keyboard().unwrap();
        builder.append(keyboard, Action::key_down(Key::Char('z'))).unwrap();

        builder.release_actions().await.unwrap();
        assert_eq!(transport.release_count(), 1);
        assert_eq!(lengths(&builder), vec![1, 1]);
    }
}
