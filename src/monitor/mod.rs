pub mod pipeline;
pub mod scheduler;

pub use pipeline::{Outcome, ReleaseMonitor};
pub use scheduler::Scheduler;
