//! Executor port: the context on which replies are delivered.

use std::sync::Arc;

/// A unit of work handed to an [`Executor`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks on a specific execution context.
///
/// Adapter completions arrive on arbitrary threads; resolvers hand the
/// delivery to an executor so the channel is only ever touched from the
/// context it expects.
pub trait Executor: Send + Sync {
    /// Run `task` on this executor's context. Must not drop the task.
    fn execute(&self, task: Task);
}

impl<T: Executor + ?Sized> Executor for Arc<T> {
    fn execute(&self, task: Task) {
        (**self).execute(task);
    }
}
