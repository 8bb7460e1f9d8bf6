// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The agent talks to an `ExecutorBackend` instead of spawning processes
//! itself. This makes it easy to swap in a fake executor in tests while
//! keeping the production executor implementation in [`runner`].
//!
//! - `RealExecutorBackend` is the default implementation used by `execagent`.
//!   It spawns one Tokio task per command, each of which reports its terminal
//!   record over the hand-off channel.
//! - Tests can provide their own `ExecutorBackend` that, for example, records
//!   which commands were launched and directly emits completions.
//!
//! [`runner`]: super::runner

use tokio::sync::mpsc;
use tracing::debug;

use crate::exec::Deadline;
use crate::exec::runner::run_command;
use crate::types::{Command, CommandExec, ExecId};

/// Trait abstracting how submitted commands are executed.
///
/// Implementations must eventually deliver exactly one terminal
/// `CommandExec` for every launched ID on the completion channel they were
/// built with.
pub trait ExecutorBackend: Send + Sync {
    /// Start executing `command` for execution `id`.
    ///
    /// Must not block: the outcome is delivered asynchronously.
    fn launch(&self, id: ExecId, command: Command, deadline: Deadline);
}

/// Real executor backend used in production.
pub struct RealExecutorBackend {
    completed_tx: mpsc::Sender<CommandExec>,
}

impl RealExecutorBackend {
    /// Create a new real executor backend, wiring it to the given completion
    /// sender.
    pub fn new(completed_tx: mpsc::Sender<CommandExec>) -> Self {
        Self { completed_tx }
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn launch(&self, id: ExecId, command: Command, deadline: Deadline) {
        debug!(id = %id, command = %command.command, "spawning executor task");
        let tx = self.completed_tx.clone();
        tokio::spawn(run_command(id, command, deadline, tx));
    }
}
