// src/process/terminator.rs

//! Find a running process by name and kill it.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command as ProcessCommand;
use tracing::{debug, info, warn};

use crate::exec::Deadline;
use crate::process::ps::{ProcessLister, ps_command};

/// Every step of `Terminator::stop` that can go wrong.
#[derive(Error, Debug)]
pub enum TerminationError {
    #[error("failed to execute command to find process {name}: {source}")]
    ListingFailed {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to execute command to find process {name}: {status}")]
    ListingStatus { name: String, status: ExitStatus },

    #[error("timed out after {timeout:?} looking up process {name}")]
    ListingTimedOut { name: String, timeout: Duration },

    #[error("failed to parse process ID for process {name}: {reason}")]
    InvalidPid { name: String, reason: String },

    #[error("failed to find process with name {name} (PID: {pid}): {reason}")]
    NotRunning { name: String, pid: i32, reason: String },

    #[error("failed to stop process {name} (PID: {pid}): {reason}")]
    SignalFailed { name: String, pid: i32, reason: String },
}

/// Stops processes by name using the platform listing command.
///
/// Only the first PID the listing reports is targeted; other processes with
/// the same name are left alone.
#[derive(Debug, Clone, Copy)]
pub struct Terminator {
    lister: ProcessLister,
}

impl Default for Terminator {
    fn default() -> Self {
        Self { lister: ps_command }
    }
}

impl Terminator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom listing command instead of the platform default.
    pub fn with_lister(lister: ProcessLister) -> Self {
        Self { lister }
    }

    /// Look up `name` and send the first matching process SIGKILL.
    ///
    /// `deadline` bounds the listing command only, not the target process.
    pub async fn stop(&self, name: &str, deadline: Deadline) -> Result<i32, TerminationError> {
        let pid = self.find_pid(name, deadline).await?;
        info!(process = %name, pid, "stopping process");
        signal_kill(name, pid)?;
        info!(process = %name, pid, "process stopped");
        Ok(pid)
    }

    /// First PID listed for `name`.
    pub async fn find_pid(&self, name: &str, deadline: Deadline) -> Result<i32, TerminationError> {
        let (program, args) = (self.lister)(name);
        debug!(process = %name, program = %program, ?args, "listing processes");

        let mut cmd = ProcessCommand::new(&program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout_at(deadline.instant(), cmd.output())
            .await
            .map_err(|_| TerminationError::ListingTimedOut {
                name: name.to_string(),
                timeout: deadline.budget(),
            })?
            .map_err(|source| TerminationError::ListingFailed {
                name: name.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(TerminationError::ListingStatus {
                name: name.to_string(),
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_first_pid(name, &stdout)
    }
}

/// Parse the first line of a listing as a PID.
///
/// Zero and negative values are rejected: `kill(2)` treats them as process
/// groups.
pub fn parse_first_pid(name: &str, listing: &str) -> Result<i32, TerminationError> {
    let first = listing.lines().next().unwrap_or("").trim();
    if first.is_empty() {
        return Err(TerminationError::InvalidPid {
            name: name.to_string(),
            reason: "no process listed".to_string(),
        });
    }

    let pid: i32 = first.parse().map_err(|e| TerminationError::InvalidPid {
        name: name.to_string(),
        reason: format!("{first:?}: {e}"),
    })?;

    if pid <= 0 {
        return Err(TerminationError::InvalidPid {
            name: name.to_string(),
            reason: format!("{pid} is not a valid process ID"),
        });
    }
    Ok(pid)
}

#[cfg(unix)]
fn signal_kill(name: &str, pid: i32) -> Result<(), TerminationError> {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let target = Pid::from_raw(pid);

    // Signal 0 only checks that the process exists and can be signalled.
    kill(target, None::<Signal>).map_err(|errno| TerminationError::NotRunning {
        name: name.to_string(),
        pid,
        reason: errno.desc().to_string(),
    })?;

    kill(target, Signal::SIGKILL).map_err(|errno| {
        warn!(process = %name, pid, error = %errno, "failed to signal process");
        TerminationError::SignalFailed {
            name: name.to_string(),
            pid,
            reason: errno.desc().to_string(),
        }
    })
}

#[cfg(not(unix))]
fn signal_kill(name: &str, pid: i32) -> Result<(), TerminationError> {
    Err(TerminationError::SignalFailed {
        name: name.to_string(),
        pid,
        reason: "signalling processes is not supported on this platform".to_string(),
    })
}
