// src/types.rs

//! Wire-level data model shared by the engine and the HTTP boundary.
//!
//! The JSON shapes are fixed:
//!
//! ```json
//! { "command": "echo", "args": ["hello"], "sync": true }
//! { "id": "cmd-42" }
//! { "id": "cmd-42", "status": "SUCCESS", "results": ["hello"] }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical execution identifier type used throughout the engine.
pub type ExecId = String;

/// A command submitted by a caller.
///
/// `command` is mandatory; `args` and `sync` fall back to empty / `false`
/// when omitted from the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub sync: bool,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            command: program.into(),
            args: Vec::new(),
            sync: false,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn synchronous(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Response to an asynchronous submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandId {
    pub id: ExecId,
}

/// Status of a tracked execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecStatus {
    #[serde(rename = "IN PROGRESS")]
    InProgress,
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILURE")]
    Failure,
}

impl ExecStatus {
    /// `Success` and `Failure` never change again once recorded.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ExecStatus::InProgress)
    }
}

impl fmt::Display for ExecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecStatus::InProgress => "IN PROGRESS",
            ExecStatus::Success => "SUCCESS",
            ExecStatus::Failure => "FAILURE",
        };
        f.write_str(s)
    }
}

/// The tracked state of one submitted command.
///
/// `results` holds the captured stdout lines on success, or a single error
/// description on failure. It stays empty while the execution is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandExec {
    pub id: ExecId,
    pub status: ExecStatus,
    #[serde(default)]
    pub results: Vec<String>,
}

impl CommandExec {
    pub fn in_progress(id: impl Into<ExecId>) -> Self {
        Self {
            id: id.into(),
            status: ExecStatus::InProgress,
            results: Vec::new(),
        }
    }

    pub fn success(id: impl Into<ExecId>, results: Vec<String>) -> Self {
        Self {
            id: id.into(),
            status: ExecStatus::Success,
            results,
        }
    }

    pub fn failure(id: impl Into<ExecId>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: ExecStatus::Failure,
            results: vec![reason.into()],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
