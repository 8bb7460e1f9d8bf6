// src/registry.rs

//! Execution registry: the single store of every execution the agent has
//! accepted.
//!
//! All access goes through one internal mutex. Critical sections are plain
//! map operations; ID generation retries on collision while the lock is held
//! so that no two `register` calls can hand out the same ID.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{CommandExec, ExecId, ExecStatus};

/// Prefix of every execution ID.
const ID_PREFIX: &str = "cmd-";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown execution ID {0}")]
    NotFound(ExecId),

    #[error("execution {0} already reached a terminal status")]
    AlreadyTerminal(ExecId),

    #[error("refusing to apply non-terminal record for execution {0}")]
    NotTerminal(ExecId),
}

/// Thread-safe map from execution ID to its current record.
#[derive(Debug, Default)]
pub struct Registry {
    executions: Mutex<HashMap<ExecId, CommandExec>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh ID and record an in-progress execution for it.
    pub fn register(&self) -> ExecId {
        let mut rng = rand::thread_rng();
        let mut executions = self.lock();

        let id = loop {
            let candidate = format!("{ID_PREFIX}{}", rng.gen_range(0..=i64::MAX));
            if !executions.contains_key(&candidate) {
                break candidate;
            }
            debug!(id = %candidate, "execution ID collision; regenerating");
        };

        executions.insert(id.clone(), CommandExec::in_progress(id.clone()));
        id
    }

    /// Current record for `id`.
    pub fn get(&self, id: &str) -> Result<CommandExec, RegistryError> {
        self.lock()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Store the terminal record of an execution.
    ///
    /// Only an in-progress entry may be overwritten, and only with a terminal
    /// record. Anything else is rejected and leaves the registry untouched.
    pub fn apply(&self, exec: CommandExec) -> Result<(), RegistryError> {
        if !exec.is_terminal() {
            return Err(RegistryError::NotTerminal(exec.id));
        }

        let mut executions = self.lock();
        match executions.get_mut(&exec.id) {
            None => Err(RegistryError::NotFound(exec.id)),
            Some(current) if current.status != ExecStatus::InProgress => {
                warn!(id = %exec.id, status = %current.status, "duplicate completion ignored");
                Err(RegistryError::AlreadyTerminal(exec.id))
            }
            Some(current) => {
                *current = exec;
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written entry, so a
    // poisoned mutex is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<ExecId, CommandExec>> {
        self.executions
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}
