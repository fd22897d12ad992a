pub mod errors;
pub mod recording;
pub mod trace;
pub mod transport;

pub use errors::{TransportError, TransportResult};
pub use recording::{RecordingTransport, TransportCall};
pub use trace::TransportTracer;
pub use transport::{ActionsTransport, NoopTransport};
