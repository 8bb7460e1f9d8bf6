// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AgentError, Result};

/// Upper bound for every `timeout_secs` key (one day).
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::AgentError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.server, raw.exec, raw.stop))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_server(cfg)?;
    validate_exec(cfg)?;
    validate_stop(cfg)?;
    Ok(())
}

fn validate_server(cfg: &RawConfigFile) -> Result<()> {
    if cfg.server.bind.trim().is_empty() {
        return Err(AgentError::ConfigError(
            "[server].bind must not be empty".to_string(),
        ));
    }
    if cfg.server.port == 0 {
        return Err(AgentError::ConfigError(
            "[server].port must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_timeout(key: &str, secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(AgentError::ConfigError(format!(
            "{key} must be >= 1 (got 0)"
        )));
    }
    if secs > MAX_TIMEOUT_SECS {
        return Err(AgentError::ConfigError(format!(
            "{key} must be <= {MAX_TIMEOUT_SECS} (got {secs})"
        )));
    }
    Ok(())
}

fn validate_exec(cfg: &RawConfigFile) -> Result<()> {
    validate_timeout("[exec].timeout_secs", cfg.exec.timeout_secs)?;
    if cfg.exec.channel_capacity == 0 {
        return Err(AgentError::ConfigError(
            "[exec].channel_capacity must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.exec.sync_poll_interval_ms == 0 {
        return Err(AgentError::ConfigError(
            "[exec].sync_poll_interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_stop(cfg: &RawConfigFile) -> Result<()> {
    validate_timeout("[stop].timeout_secs", cfg.stop.timeout_secs)
}
