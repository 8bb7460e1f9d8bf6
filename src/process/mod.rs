// src/process/mod.rs

//! Stopping host processes by name.
//!
//! - [`ps`] builds the platform's process-listing command.
//! - [`terminator`] resolves the first listed PID and signals it.

pub mod ps;
pub mod terminator;

pub use ps::{ProcessLister, ps_command};
pub use terminator::{TerminationError, Terminator};
