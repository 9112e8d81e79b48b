//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod status;
pub mod stepper;
pub mod sweep;

pub use status::status_task;
pub use stepper::{stepper_task, Motor};
pub use sweep::sweep_task;
