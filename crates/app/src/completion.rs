//! Bridge from callback-style backends to the single-result adapter port.
//!
//! A backend that reports through "on success" / "on error" callbacks hands
//! a [`Completion`] to its callback thread and returns the paired future from
//! its [`DeviceAdapter`](crate::ports::DeviceAdapter) method. The completion
//! is consumed by whichever callback fires, so a second report cannot even be
//! expressed.

use std::future::Future;

use tokio::sync::oneshot;

use blebridge_domain::error::{DomainError, ErrorCode};

/// One-shot handle used by a backend to report the outcome of a query.
#[derive(Debug)]
pub struct Completion<T> {
    sender: oneshot::Sender<Result<T, DomainError>>,
}

impl<T> Completion<T> {
    /// Report a successful result.
    pub fn succeed(self, value: T) {
        self.complete(Ok(value));
    }

    /// Report a failure.
    pub fn fail(self, error: DomainError) {
        self.complete(Err(error));
    }

    /// Report an outcome.
    pub fn complete(self, outcome: Result<T, DomainError>) {
        if self.sender.send(outcome).is_err() {
            tracing::debug!("query outcome reported after the caller went away");
        }
    }
}

/// Create a completion handle and the future that resolves when it is used.
///
/// If the handle is dropped without being used, the future resolves with
/// [`ErrorCode::OPERATION_CANCELLED`].
pub fn completion<T: Send>() -> (
    Completion<T>,
    impl Future<Output = Result<T, DomainError>> + Send,
) {
    let (sender, receiver) = oneshot::channel();
    let outcome = async move {
        receiver.await.unwrap_or_else(|_| {
            Err(DomainError::new(
                ErrorCode::OPERATION_CANCELLED,
                "Operation was cancelled",
            )
            .with_internal_message("adapter dropped the query without reporting an outcome"))
        })
    };
    (Completion { sender }, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[tokio::test]
    async fn should_resolve_with_value_reported_from_another_thread() {
        let (completion, outcome) = completion::<Vec<u8>>();
        thread::spawn(move || completion.succeed(vec![1, 2, 3]));
        assert_eq!(outcome.await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn should_resolve_with_reported_error() {
        let (completion, outcome) = completion::<()>();
        completion.fail(DomainError::new(42_u16, "Device not found"));
        let err = outcome.await.unwrap_err();
        assert_eq!(err.code, ErrorCode::new(42));
        assert_eq!(err.reason, "Device not found");
    }

    #[tokio::test]
    async fn should_resolve_as_cancelled_when_dropped() {
        let (completion, outcome) = completion::<()>();
        drop(completion);
        let err = outcome.await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OPERATION_CANCELLED);
    }

    #[test]
    fn should_not_panic_when_caller_is_gone() {
        let (completion, outcome) = completion::<u8>();
        drop(outcome);
        completion.succeed(1);
    }
}
