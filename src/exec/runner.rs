// src/exec/runner.rs

//! Individual command process runner.

use std::process::{ExitStatus, Stdio};

use tokio::process::Command as ProcessCommand;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::exec::{Deadline, ExecError};
use crate::types::{Command, CommandExec, ExecId};

/// Run a single command and deliver its terminal record on `completed_tx`.
///
/// Every outcome, including spawn errors and deadline expiry, is turned into a
/// `CommandExec`; nothing is reported back to the submitter directly. The
/// send blocks while the hand-off channel is full.
pub async fn run_command(
    id: ExecId,
    command: Command,
    deadline: Deadline,
    completed_tx: mpsc::Sender<CommandExec>,
) {
    info!(
        id = %id,
        command = %command.command,
        args = ?command.args,
        "executing command"
    );

    let exec = match execute(&command, deadline).await {
        Ok(lines) => CommandExec::success(id.clone(), lines),
        Err(err) => {
            warn!(id = %id, command = %command.command, error = %err, "command failed");
            CommandExec::failure(id.clone(), err.to_string())
        }
    };

    info!(id = %id, status = %exec.status, lines = exec.results.len(), "command finished");

    if completed_tx.send(exec).await.is_err() {
        error!(id = %id, "completion channel closed; result dropped");
    }
}

/// Spawn `command` and wait for it, at most until `deadline`.
///
/// Returns the stdout lines on a zero exit status. When the deadline passes
/// the child is killed (it is dropped with `kill_on_drop`).
pub async fn execute(command: &Command, deadline: Deadline) -> Result<Vec<String>, ExecError> {
    let mut cmd = ProcessCommand::new(&command.command);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|source| ExecError::Spawn {
        program: command.command.clone(),
        source,
    })?;
    let pid = child.id();
    debug!(command = %command.command, ?pid, "child process spawned");

    let output = match tokio::time::timeout_at(deadline.instant(), child.wait_with_output()).await
    {
        Ok(res) => res.map_err(ExecError::Wait)?,
        Err(_) => {
            warn!(command = %command.command, ?pid, "deadline elapsed; killing process");
            return Err(ExecError::DeadlineExceeded(deadline.budget()));
        }
    };

    if !output.stderr.is_empty() {
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            debug!(command = %command.command, "stderr: {}", line);
        }
    }

    check_status(output.status)?;
    Ok(split_lines(&output.stdout))
}

/// Split captured output into lines, dropping the terminator (`\n` or
/// `\r\n`).
pub fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

fn check_status(status: ExitStatus) -> Result<(), ExecError> {
    if status.success() {
        return Ok(());
    }
    if let Some(code) = status.code() {
        return Err(ExecError::ExitStatus(code));
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(ExecError::Signal(signal));
        }
    }

    Err(ExecError::Abnormal)
}
