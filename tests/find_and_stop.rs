// tests/find_and_stop.rs

mod common;
use crate::common::builders::fast_settings;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::process::Stdio;

use execagent::engine::Agent;
use execagent::errors::AgentError;
use execagent::process::Terminator;
use execagent::types::ExecStatus;

type TestResult = Result<(), Box<dyn Error>>;

/// Name of the stand-in process; short enough to survive the kernel's
/// 15-byte `comm` truncation and unlikely to collide with anything on the host.
#[cfg(target_os = "linux")]
const TARGET_NAME: &str = "execagent-nap";

#[cfg(target_os = "linux")]
fn sleep_binary() -> Option<std::path::PathBuf> {
    ["/bin/sleep", "/usr/bin/sleep"]
        .into_iter()
        .map(std::path::PathBuf::from)
        .find(|path| path.exists())
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn uniquely_named_process_is_stopped_by_name() -> TestResult {
    init_tracing();

    let Some(sleep) = sleep_binary() else {
        return Ok(());
    };
    let dir = tempfile::tempdir()?;
    let target = dir.path().join(TARGET_NAME);
    std::os::unix::fs::symlink(&sleep, &target)?;

    let mut child = tokio::process::Command::new(&target)
        .arg("30")
        .stdout(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    let agent = Agent::start(fast_settings());
    let mut exec = None;
    // The process may not be listed until exec has completed.
    for _ in 0..50 {
        match agent.find_and_stop(TARGET_NAME).await {
            Ok(stopped) => {
                exec = Some(stopped);
                break;
            }
            Err(_) => tokio::time::sleep(std::time::Duration::from_millis(20)).await,
        }
    }
    let exec = exec.ok_or("process was never found by name")?;

    assert_eq!(exec.status, ExecStatus::Success);
    assert_eq!(exec.results, vec![format!("Process {TARGET_NAME} was stopped")]);

    let status = with_timeout(child.wait()).await?;
    assert!(!status.success(), "{TARGET_NAME} should have been killed");
    Ok(())
}

#[tokio::test]
async fn unknown_process_surfaces_termination_error() {
    init_tracing();
    let agent = Agent::start(fast_settings());

    let err = with_timeout(agent.find_and_stop("no-such-process-4711"))
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Termination(_)));
    assert!(err.to_string().starts_with("Could not stop process "));
}

#[cfg(unix)]
#[tokio::test]
async fn listed_pid_that_is_gone_is_not_running() {
    init_tracing();

    // PIDs are capped well below i32::MAX on every supported kernel.
    fn lister(_name: &str) -> (String, Vec<String>) {
        ("echo".to_string(), vec!["2147483646".to_string()])
    }

    let agent = Agent::start(fast_settings()).with_terminator(Terminator::with_lister(lister));
    let err = with_timeout(agent.find_and_stop("ghost")).await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("failed to find process with name ghost"), "{msg}");
}
