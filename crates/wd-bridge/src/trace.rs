use tracing::{span, Level, Span};

#[derive(Clone, Default)]
pub struct TransportTracer;

impl TransportTracer {
    pub fn span(&self, command: &str) -> Span {
        span!(Level::INFO, "wd.actions", command = command)
    }
}
