//! Shared models and settings for the `darkly` workspace.
//!
//! * [`network`] holds the address range and per-host result models.
//! * [`config`] holds rendering, sweep and ping settings.
//! * [`log`] holds the logging macros used by the front end.

pub mod config;
pub mod log;
pub mod network;
