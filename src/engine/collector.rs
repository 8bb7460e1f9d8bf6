// src/engine/collector.rs

//! Completion collector: the single consumer of the hand-off channel.
//!
//! Executors send terminal `CommandExec` records into a bounded channel; this
//! loop pulls them one at a time and applies them to the registry. Because
//! there is exactly one consumer, registry writes for completions are
//! serialised, and a full channel pushes back on the executors.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::registry::Registry;
use crate::types::CommandExec;

/// Handle to the running collector task.
///
/// Dropping the handle also stops the collector, since the shutdown channel
/// closes with it.
#[derive(Debug)]
pub struct CollectorHandle {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl CollectorHandle {
    /// Ask the collector to stop and wait for it to finish.
    ///
    /// Completions still queued in the channel are not applied.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            if tx.send(()).is_err() {
                debug!("collector already stopped");
            }
        }
        if let Err(e) = (&mut self.handle).await {
            warn!(error = %e, "collector task did not finish cleanly");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn the collector loop on the current Tokio runtime.
pub fn spawn_collector(
    registry: Arc<Registry>,
    completed_rx: mpsc::Receiver<CommandExec>,
) -> CollectorHandle {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(collect_results(registry, completed_rx, shutdown_rx));

    CollectorHandle {
        shutdown: Some(shutdown_tx),
        handle,
    }
}

async fn collect_results(
    registry: Arc<Registry>,
    mut completed_rx: mpsc::Receiver<CommandExec>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    info!("completion collector started");

    loop {
        tokio::select! {
            maybe_exec = completed_rx.recv() => {
                match maybe_exec {
                    Some(exec) => apply_completion(&registry, exec),
                    None => {
                        info!("completion channel closed; collector exiting");
                        break;
                    }
                }
            }
            _ = &mut shutdown_rx => {
                info!("shutdown requested; collector exiting");
                break;
            }
        }
    }
}

fn apply_completion(registry: &Registry, exec: CommandExec) {
    let id = exec.id.clone();
    let status = exec.status;
    match registry.apply(exec) {
        Ok(()) => debug!(id = %id, %status, "completion applied"),
        Err(e) => warn!(id = %id, error = %e, "completion rejected by registry"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::types::ExecStatus;

    #[tokio::test]
    async fn applies_completions_in_order_received() {
        let registry = Arc::new(Registry::new());
        let (tx, rx) = mpsc::channel(5);
        let collector = spawn_collector(Arc::clone(&registry), rx);

        let a = registry.register();
        let b = registry.register();
        tx.send(CommandExec::success(a.clone(), vec!["a".into()]))
            .await
            .unwrap();
        tx.send(CommandExec::failure(b.clone(), "boom")).await.unwrap();

        tokio::time::timeout(Duration::from_secs(5), async {
            while !registry.get(&b).unwrap().is_terminal() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();

        assert_eq!(registry.get(&a).unwrap().status, ExecStatus::Success);
        assert_eq!(registry.get(&b).unwrap().results, vec!["boom".to_string()]);

        collector.shutdown().await;
    }

    #[tokio::test]
    async fn stops_on_shutdown_and_on_closed_channel() {
        let registry = Arc::new(Registry::new());

        let (_tx, rx) = mpsc::channel::<CommandExec>(1);
        let collector = spawn_collector(Arc::clone(&registry), rx);
        tokio::time::timeout(Duration::from_secs(5), collector.shutdown())
            .await
            .unwrap();

        let (tx, rx) = mpsc::channel::<CommandExec>(1);
        let collector = spawn_collector(registry, rx);
        drop(tx);
        tokio::time::timeout(Duration::from_secs(5), async {
            while !collector.is_finished() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
    }
}
