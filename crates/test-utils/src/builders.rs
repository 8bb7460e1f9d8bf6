#![allow(dead_code)]

use std::time::Duration;

use execagent::config::{ConfigFile, RawConfigFile};
use execagent::engine::AgentSettings;
use execagent::types::Command;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn exec_timeout_secs(mut self, secs: u64) -> Self {
        self.config.exec.timeout_secs = secs;
        self
    }

    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.exec.channel_capacity = capacity;
        self
    }

    pub fn sync_poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.exec.sync_poll_interval_ms = ms;
        self
    }

    pub fn stop_timeout_secs(mut self, secs: u64) -> Self {
        self.config.stop.timeout_secs = secs;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Agent settings tuned for fast tests: short poll interval, short deadline.
pub fn fast_settings() -> AgentSettings {
    AgentSettings {
        exec_timeout: Duration::from_secs(10),
        channel_capacity: 5,
        sync_poll_interval: Duration::from_millis(20),
        stop_timeout: Duration::from_secs(10),
    }
}

/// Builder for `Command`.
pub struct CommandBuilder {
    command: Command,
}

impl CommandBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            command: Command::new(program),
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.command.args.push(arg.to_string());
        self
    }

    pub fn sync(mut self) -> Self {
        self.command.sync = true;
        self
    }

    pub fn build(self) -> Command {
        self.command
    }
}
