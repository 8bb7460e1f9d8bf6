// tests/config_errors.rs

mod common;
use crate::common::builders::ConfigFileBuilder;

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use execagent::config::{MAX_TIMEOUT_SECS, load_and_validate};
use execagent::engine::Agent;
use execagent::errors::AgentError;
use execagent::types::Command;

#[test]
fn full_config_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[server]
bind = "127.0.0.1"
port = 9100

[exec]
timeout_secs = 5
channel_capacity = 2
sync_poll_interval_ms = 250

[stop]
timeout_secs = 3
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.server.bind, "127.0.0.1");
    assert_eq!(cfg.server.port, 9100);

    let settings = cfg.agent_settings();
    assert_eq!(settings.exec_timeout, Duration::from_secs(5));
    assert_eq!(settings.channel_capacity, 2);
    assert_eq!(settings.sync_poll_interval, Duration::from_millis(250));
    assert_eq!(settings.stop_timeout, Duration::from_secs(3));
}

#[test]
fn partial_config_keeps_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[exec]\ntimeout_secs = 7\n").unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.exec.timeout_secs, 7);
    assert_eq!(cfg.exec.channel_capacity, 5);
    assert_eq!(cfg.server.port, 8086);
}

#[test]
fn zero_timeout_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[exec]\ntimeout_secs = 0\n").unwrap();

    match load_and_validate(file.path()) {
        Err(AgentError::ConfigError(msg)) => assert!(msg.contains("timeout_secs")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_key_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[exec]\ntimeout = 3\n").unwrap();

    match load_and_validate(file.path()) {
        Err(AgentError::TomlError(_)) => {}
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn missing_file_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_and_validate(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(AgentError::IoError(_))));
}

#[test]
fn builder_produces_matching_settings() {
    let cfg = ConfigFileBuilder::new()
        .port(9001)
        .channel_capacity(3)
        .sync_poll_interval_ms(10)
        .build();
    assert_eq!(cfg.server.port, 9001);
    assert_eq!(cfg.agent_settings().channel_capacity, 3);
    assert_eq!(
        cfg.agent_settings().sync_poll_interval,
        Duration::from_millis(10)
    );
}

#[test]
fn oversized_exec_timeout_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[exec]\ntimeout_secs = 18446744073709551615\n").unwrap();

    match load_and_validate(file.path()) {
        Err(AgentError::ConfigError(msg)) => {
            assert!(msg.contains("[exec].timeout_secs"), "{msg}");
            assert!(msg.contains(&MAX_TIMEOUT_SECS.to_string()), "{msg}");
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn oversized_stop_timeout_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[stop]\ntimeout_secs = {}\n", MAX_TIMEOUT_SECS + 1).unwrap();

    match load_and_validate(file.path()) {
        Err(AgentError::ConfigError(msg)) => assert!(msg.contains("[stop].timeout_secs"), "{msg}"),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[tokio::test]
async fn largest_accepted_timeouts_do_not_break_submission() {
    let cfg = ConfigFileBuilder::new()
        .exec_timeout_secs(MAX_TIMEOUT_SECS)
        .stop_timeout_secs(MAX_TIMEOUT_SECS)
        .build();

    let agent = Agent::start(cfg.agent_settings());
    let id = agent.submit(Command::new("definitely-not-a-real-binary-4711"));
    assert!(agent.status(&id).is_ok());
    agent.shutdown().await;
}
