//! Shared helpers for execagent's integration tests.

pub mod builders;
pub mod fake_executor;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use execagent::engine::Agent;
use execagent::types::CommandExec;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Upper bound for any single awaited step in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Initialise tracing for tests.
///
/// Logs are captured per test and only shown for failures (or with
/// `-- --nocapture`). Filter with `RUST_LOG`, e.g. `RUST_LOG=execagent=debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, failing the test after [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .expect("test step timed out")
}

/// Poll `agent` until `id` is terminal, returning the final record and every
/// record observed on the way (final one included).
pub async fn poll_until_terminal(agent: &Agent, id: &str) -> (CommandExec, Vec<CommandExec>) {
    let mut seen = Vec::new();
    loop {
        let exec = agent.status(id).expect("registered ID must be known");
        seen.push(exec.clone());
        if exec.is_terminal() {
            return (exec, seen);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
