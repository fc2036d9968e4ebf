//! In-process [`Executor`] implementations.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use tokio::sync::mpsc;

use crate::ports::{Executor, Task};

/// Runs every task immediately on the calling thread.
///
/// Suitable when the channel is safe to touch from any thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, task: Task) {
        task();
    }
}

/// Runs tasks one at a time, in submission order, on a dedicated named
/// thread.
///
/// The thread stops once every handle to the executor is dropped and the
/// queue is drained. A panicking task is logged and does not stop the thread.
#[derive(Debug)]
pub struct SerialExecutor {
    name: String,
    sender: mpsc::UnboundedSender<Task>,
}

impl SerialExecutor {
    /// Spawn the executor thread.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be created.
    pub fn spawn(name: impl Into<String>) -> io::Result<Self> {
        let name = name.into();
        let (sender, mut receiver) = mpsc::unbounded_channel::<Task>();

        let thread_name = name.clone();
        thread::Builder::new().name(name.clone()).spawn(move || {
            while let Some(task) = receiver.blocking_recv() {
                if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
                    tracing::error!(executor = %thread_name, "serial executor task panicked");
                }
            }
            tracing::debug!(executor = %thread_name, "serial executor drained");
        })?;

        tracing::debug!(executor = %name, "serial executor started");
        Ok(Self { name, sender })
    }

    /// Name of the executor thread.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Executor for SerialExecutor {
    fn execute(&self, task: Task) {
        // The thread only goes away if it could not be kept alive; run
        // inline rather than lose the delivery.
        if let Err(mpsc::error::SendError(task)) = self.sender.send(task) {
            tracing::warn!(executor = %self.name, "serial executor is gone, running task inline");
            task();
        }
    }
}
