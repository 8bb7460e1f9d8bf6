// src/engine/agent.rs

//! The agent ties the registry, the executor backend, the completion
//! collector and the process terminator together. The HTTP layer only ever
//! talks to an [`Agent`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::collector::{CollectorHandle, spawn_collector};
use crate::errors::Result;
use crate::exec::{Deadline, ExecutorBackend, RealExecutorBackend};
use crate::process::Terminator;
use crate::registry::Registry;
use crate::types::{Command, CommandExec, CommandId, ExecId, ExecStatus};

/// Tunables for an [`Agent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSettings {
    /// Deadline for every launched command, measured from submission.
    pub exec_timeout: Duration,
    /// Capacity of the executor -> collector hand-off channel.
    pub channel_capacity: usize,
    /// Polling cadence while a synchronous command runs.
    pub sync_poll_interval: Duration,
    /// Deadline for the process-listing step of find-and-stop.
    pub stop_timeout: Duration,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            exec_timeout: Duration::from_secs(20),
            channel_capacity: 5,
            sync_poll_interval: Duration::from_secs(1),
            stop_timeout: Duration::from_secs(20),
        }
    }
}

/// What a submission produced: an ID to poll, or the finished record when
/// the caller asked to wait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Submission {
    Accepted(CommandId),
    Completed(CommandExec),
}

pub struct Agent {
    registry: Arc<Registry>,
    executor: Box<dyn ExecutorBackend>,
    terminator: Terminator,
    settings: AgentSettings,
    collector: Mutex<Option<CollectorHandle>>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("settings", &self.settings)
            .field("executions", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl Agent {
    /// Start an agent that runs real processes.
    ///
    /// Must be called from within a Tokio runtime: the completion collector
    /// is spawned here, before any command can be submitted.
    pub fn start(settings: AgentSettings) -> Self {
        Self::start_with(settings, RealExecutorBackend::new)
    }

    /// Start an agent with a custom executor backend.
    ///
    /// `make_backend` receives the sending half of the hand-off channel.
    pub fn start_with<E, F>(settings: AgentSettings, make_backend: F) -> Self
    where
        E: ExecutorBackend + 'static,
        F: FnOnce(mpsc::Sender<CommandExec>) -> E,
    {
        let registry = Arc::new(Registry::new());
        let (completed_tx, completed_rx) = mpsc::channel(settings.channel_capacity.max(1));
        let collector = spawn_collector(Arc::clone(&registry), completed_rx);
        let executor = Box::new(make_backend(completed_tx));

        info!(?settings, "agent started");

        Self {
            registry,
            executor,
            terminator: Terminator::default(),
            settings,
            collector: Mutex::new(Some(collector)),
        }
    }

    /// Replace the process terminator (used to inject a listing command).
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register `command` and hand it to the executor.
    pub fn submit(&self, command: Command) -> ExecId {
        let id = self.registry.register();
        let deadline = Deadline::after(self.settings.exec_timeout);
        info!(id = %id, command = %command.command, sync = command.sync, "command submitted");
        self.executor.launch(id.clone(), command, deadline);
        id
    }

    /// Submit `command`, waiting for the result when `command.sync` is set.
    pub async fn exec(&self, command: Command) -> Result<Submission> {
        let sync = command.sync;
        let id = self.submit(command);
        if !sync {
            return Ok(Submission::Accepted(CommandId { id }));
        }
        let exec = self.wait_for_completion(&id).await?;
        Ok(Submission::Completed(exec))
    }

    /// Current record for `id`.
    pub fn status(&self, id: &str) -> Result<CommandExec> {
        Ok(self.registry.get(id)?)
    }

    /// Poll the registry until `id` reaches a terminal status.
    pub async fn wait_for_completion(&self, id: &str) -> Result<CommandExec> {
        let period = self.settings.sync_poll_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let exec = self.registry.get(id)?;
            if exec.is_terminal() {
                return Ok(exec);
            }
            debug!(id = %id, "waiting for synchronous command");
        }
    }

    /// Kill the first process named `name`.
    pub async fn find_and_stop(&self, name: &str) -> Result<CommandExec> {
        let deadline = Deadline::after(self.settings.stop_timeout);
        self.terminator.stop(name, deadline).await?;
        Ok(CommandExec {
            id: String::new(),
            status: ExecStatus::Success,
            results: vec![format!("Process {name} was stopped")],
        })
    }

    /// Stop the completion collector. Idempotent.
    ///
    /// Commands still running after this keep their in-progress status.
    pub async fn shutdown(&self) {
        let collector = self
            .collector
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .take();
        if let Some(collector) = collector {
            collector.shutdown().await;
            info!("agent stopped");
        }
    }
}
