use crate::submission::error::SubmitError;
use crate::task::execution::{SubmitCompletion, SubmitInvocation, execute_invocation};
use crate::transport::Transport;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Each invocation runs on its own worker thread.
    Threaded,
    /// Invocations run to completion on the caller's thread. The completion
    /// is still only observed through `drain_ready`.
    Inline,
}

/// Runs submissions off the event loop and hands completions back to it.
pub struct SubmitExecutor {
    transport: Arc<dyn Transport>,
    mode: ExecutionMode,
    completion_tx: Sender<SubmitCompletion>,
    completion_rx: Receiver<SubmitCompletion>,
}

impl SubmitExecutor {
    pub fn new(transport: Arc<dyn Transport>, mode: ExecutionMode) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<SubmitCompletion>();
        Self {
            transport,
            mode,
            completion_tx,
            completion_rx,
        }
    }

    pub fn threaded(transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, ExecutionMode::Threaded)
    }

    pub fn inline(transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, ExecutionMode::Inline)
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn spawn(&self, invocation: SubmitInvocation) {
        match self.mode {
            ExecutionMode::Threaded => {
                let transport = Arc::clone(&self.transport);
                let completion_tx = self.completion_tx.clone();
                std::thread::spawn(move || {
                    let id = invocation.id;
                    // A panicking worker still reports, so waiters never hang.
                    let completion = panic::catch_unwind(AssertUnwindSafe(|| {
                        execute_invocation(invocation, transport.as_ref())
                    }))
                    .unwrap_or_else(|_| SubmitCompletion {
                        id,
                        result: Err(SubmitError::Aborted),
                    });
                    let _ = completion_tx.send(completion);
                });
            }
            ExecutionMode::Inline => {
                let completion = execute_invocation(invocation, self.transport.as_ref());
                let _ = self.completion_tx.send(completion);
            }
        }
    }

    pub fn drain_ready(&self) -> Vec<SubmitCompletion> {
        let mut out = Vec::<SubmitCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// Blocks until the next completion arrives.
    pub fn wait_next(&self) -> Option<SubmitCompletion> {
        self.completion_rx.recv().ok()
    }
}
