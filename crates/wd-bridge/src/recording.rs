use action_primitives::ActionsPayload;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::VecDeque;
use tracing::debug;

use crate::errors::{TransportError, TransportResult};
use crate::transport::ActionsTransport;

/// One call observed by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Send(ActionsPayload),
    Release,
}

/// In-memory transport that keeps every call it receives.
///
/// Failures can be queued with [`RecordingTransport::fail_next`]; a queued
/// failure is consumed by the next call of either kind and that call is not
/// recorded.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: RwLock<Vec<TransportCall>>,
    failures: RwLock<VecDeque<TransportError>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, error: TransportError) {
        self.failures.write().push_back(error);
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.read().clone()
    }

    /// Payloads submitted so far, in order
    pub fn payloads(&self) -> Vec<ActionsPayload> {
        self.calls
            .read()
            .iter()
            .filter_map(|call| match call {
                TransportCall::Send(payload) => Some(payload.clone()),
                TransportCall::Release => None,
            })
            .collect()
    }

    pub fn last_payload(&self) -> Option<ActionsPayload> {
        self.payloads().pop()
    }

    pub fn release_count(&self) -> usize {
        self.calls
            .read()
            .iter()
            .filter(|call| matches!(call, TransportCall::Release))
            .count()
    }

    pub fn clear(&self) {
        self.calls.write().clear();
        self.failures.write().clear();
    }

    fn take_failure(&self) -> TransportResult<()> {
        match self.failures.write().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ActionsTransport for RecordingTransport {
    async fn send_actions(&self, payload: &ActionsPayload) -> TransportResult<()> {
        self.take_failure()?;
        debug!(
            devices = payload.device_count(),
            ticks = payload.tick_count(),
            "recorded actions payload"
        );
        self.calls.write().push(TransportCall::Send(payload.clone()));
        Ok(())
    }

    async fn release_actions(&self) -> TransportResult<()> {
        self.take_failure()?;
        self.calls.write().push(TransportCall::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::NoopTransport;

    #[tokio::test]
    async fn records_sends_and_releases_in_order() {
        let transport = RecordingTransport::new();
        transport.send_actions(&ActionsPayload::default()).await.unwrap();
        transport.release_actions().await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], TransportCall::Send(ActionsPayload::default()));
        assert_eq!(calls[1], TransportCall::Release);
        assert_eq!(transport.release_count(), 1);
        assert_eq!(transport.payloads().len(), 1);
    }

    #[tokio::test]
    async fn queued_failure_is_returned_once() {
        let transport = RecordingTransport::new();
        transport.fail_next(TransportError::NoSuchSession);

        let err = transport
            .send_actions(&ActionsPayload::default())
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::NoSuchSession);
        assert!(transport.calls().is_empty());

        transport.send_actions(&ActionsPayload::default()).await.unwrap();
        assert_eq!(transport.payloads().len(), 1);
    }

    #[tokio::test]
    async fn noop_transport_accepts_everything() {
        let transport = NoopTransport;
        assert!(transport.send_actions(&ActionsPayload::default()).await.is_ok());
        assert!(transport.release_actions().await.is_ok());
    }
}
