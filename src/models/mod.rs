//! Data types exchanged with the dashboard backend.

pub mod action;
pub mod log_event;
pub mod status;

pub use action::{ActionCommand, ActionRequest};
pub use log_event::{is_truthy, IncomingLog, LogEvent, DEFAULT_LEVEL};
pub use status::{StatusDisplay, StatusSnapshot, OFFLINE, PLACEHOLDER};
