// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::engine::AgentSettings;

/// Configuration exactly as read from a TOML file.
///
/// ```toml
/// [server]
/// bind = "0.0.0.0"
/// port = 8086
///
/// [exec]
/// timeout_secs = 20
/// channel_capacity = 5
/// sync_poll_interval_ms = 1000
///
/// [stop]
/// timeout_secs = 20
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub exec: ExecSection,

    #[serde(default)]
    pub stop: StopSection,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// `Default`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub server: ServerSection,
    pub exec: ExecSection,
    pub stop: StopSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        server: ServerSection,
        exec: ExecSection,
        stop: StopSection,
    ) -> Self {
        Self { server, exec, stop }
    }

    /// Engine tunables derived from `[exec]` and `[stop]`.
    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            exec_timeout: Duration::from_secs(self.exec.timeout_secs),
            channel_capacity: self.exec.channel_capacity,
            sync_poll_interval: Duration::from_millis(self.exec.sync_poll_interval_ms),
            stop_timeout: Duration::from_secs(self.stop.timeout_secs),
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Overridden by `--port` on the command line.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

/// `[exec]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecSection {
    /// Per-command deadline in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bound of the hand-off channel between executors and the collector.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// How often a synchronous request re-checks the registry.
    #[serde(default = "default_sync_poll_interval_ms")]
    pub sync_poll_interval_ms: u64,
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_channel_capacity() -> usize {
    5
}

fn default_sync_poll_interval_ms() -> u64 {
    1000
}

impl Default for ExecSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            channel_capacity: default_channel_capacity(),
            sync_poll_interval_ms: default_sync_poll_interval_ms(),
        }
    }
}

/// `[stop]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StopSection {
    /// Deadline for the process-listing command, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StopSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}
