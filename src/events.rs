//! Event stream for permission flow observation.

pub mod event;
pub mod log;

pub use event::{timestamp_rfc3339, FlowEvent};
pub use log::FlowLog;
