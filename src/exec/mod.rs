// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running submitted commands, using
//! `tokio::process::Command`, and handing the terminal result to the
//! completion collector over a bounded channel.
//!
//! - [`runner`] runs a single command under a deadline and reports its
//!   outcome.
//! - [`backend`] provides the `ExecutorBackend` trait and a concrete
//!   `RealExecutorBackend` that the agent uses in production, and which tests
//!   can replace with a fake implementation.

use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

pub mod backend;
pub mod runner;

pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use runner::{execute, run_command};

const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Absolute point in time by which an operation must finish.
///
/// Carries the original budget so that timeout messages can report it.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// A deadline `budget` from now.
    ///
    /// Budgets too large to represent saturate to a point roughly thirty
    /// years ahead.
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(budget)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        Self { at, budget }
    }

    pub fn instant(&self) -> Instant {
        self.at
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }
}

/// Why a command ended in the `FAILURE` state.
///
/// The `Display` text is what callers see as the single result line.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect process output: {0}")]
    Wait(#[source] io::Error),

    #[error("exit status {0}")]
    ExitStatus(i32),

    #[error("terminated by signal {0}")]
    Signal(i32),

    #[error("process ended without an exit status")]
    Abnormal,

    #[error("deadline of {0:?} exceeded; process killed")]
    DeadlineExceeded(Duration),
}
