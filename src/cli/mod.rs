pub mod devices;
pub mod plan;
pub mod runtime;

pub use devices::cmd_devices;
pub use plan::{cmd_plan, PlanArgs};
pub use runtime::init_logging;
