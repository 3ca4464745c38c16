pub mod actor;
pub mod messages;

pub use actor::{spawn_batch, BackendActor, BatchHandle};
pub use messages::{failure_description, BackendEvent, BatchSummary};
