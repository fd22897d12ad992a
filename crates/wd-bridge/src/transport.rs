use action_primitives::ActionsPayload;
use async_trait::async_trait;
use tracing::debug;

use crate::errors::TransportResult;

/// Round trips to the remote end's actions endpoints.
///
/// Implementations own retries, timeouts and cancellation; callers treat
/// every error as final.
#[async_trait]
pub trait ActionsTransport: Send + Sync {
    /// Submit one complete tick set (`POST /session/{id}/actions`).
    async fn send_actions(&self, payload: &ActionsPayload) -> TransportResult<()>;

    /// Reset the remote input state (`DELETE /session/{id}/actions`).
    async fn release_actions(&self) -> TransportResult<()>;
}

/// Accepts everything and drops it.
pub struct NoopTransport;

#[async_trait]
impl ActionsTransport for NoopTransport {
    async fn send_actions(&self, payload: &ActionsPayload) -> TransportResult<()> {
        debug!(devices = payload.device_count(), "noop transport dropped actions");
        Ok(())
    }

    async fn release_actions(&self) -> TransportResult<()> {
        Ok(())
    }
}
