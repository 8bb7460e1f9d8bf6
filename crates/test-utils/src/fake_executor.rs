use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use execagent::exec::{Deadline, ExecutorBackend};
use execagent::types::{Command, CommandExec, ExecId};

/// Decides the terminal record a `FakeExecutor` reports for a command.
pub type Script = Arc<dyn Fn(&ExecId, &Command) -> CommandExec + Send + Sync>;

/// A fake executor that:
/// - records which commands were "run"
/// - immediately reports a scripted terminal record for each launch.
///
/// The default script echoes the arguments back as a successful result.
pub struct FakeExecutor {
    completed_tx: mpsc::Sender<CommandExec>,
    launched: Arc<Mutex<Vec<(ExecId, Command)>>>,
    script: Script,
}

impl FakeExecutor {
    pub fn new(
        completed_tx: mpsc::Sender<CommandExec>,
        launched: Arc<Mutex<Vec<(ExecId, Command)>>>,
    ) -> Self {
        Self {
            completed_tx,
            launched,
            script: Arc::new(|id: &ExecId, cmd: &Command| {
                CommandExec::success(id.clone(), cmd.args.clone())
            }),
        }
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = script;
        self
    }
}

impl ExecutorBackend for FakeExecutor {
    fn launch(&self, id: ExecId, command: Command, _deadline: Deadline) {
        {
            let mut guard = self.launched.lock().unwrap();
            guard.push((id.clone(), command.clone()));
        }

        let exec = (self.script)(&id, &command);
        let tx = self.completed_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(exec).await;
        });
    }
}
