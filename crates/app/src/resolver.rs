//! Result resolver: exactly-once delivery for a pending operation.
//!
//! A [`Resolver`] is created per inbound call and may be cloned freely and
//! handed to any number of completion paths on any threads. The first call
//! to [`Resolver::resolve`] (or one of its shorthands) atomically moves the
//! operation into a terminal state and hands the continuation to the
//! injected [`Executor`]. Every later call is ignored and logged.
//!
//! ```text
//! Created ──begin──▶ Pending ──resolve(Ok)──▶ DeliveredSuccess
//!    │                  └─────resolve(Err)──▶ DeliveredFailure
//!    └── resolve(..) ──▶ (terminal states, as above)
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::Executor;

const CREATED: u8 = 0;
const PENDING: u8 = 1;
const DELIVERED_SUCCESS: u8 = 2;
const DELIVERED_FAILURE: u8 = 3;

/// Lifecycle of a pending operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    /// The resolver exists but the operation has not been issued yet.
    Created,
    /// The operation is in flight.
    Pending,
    /// A success outcome was accepted (terminal).
    DeliveredSuccess,
    /// A failure outcome was accepted (terminal).
    DeliveredFailure,
}

impl OperationState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            CREATED => Self::Created,
            PENDING => Self::Pending,
            DELIVERED_SUCCESS => Self::DeliveredSuccess,
            _ => Self::DeliveredFailure,
        }
    }

    /// Whether no further transition is allowed.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::DeliveredSuccess | Self::DeliveredFailure)
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created => "created",
            Self::Pending => "pending",
            Self::DeliveredSuccess => "delivered_success",
            Self::DeliveredFailure => "delivered_failure",
        };
        f.write_str(label)
    }
}

/// What happened to a resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// This attempt won; its outcome was handed to the executor.
    Delivered,
    /// An earlier attempt already won; this outcome was discarded.
    Ignored(OperationState),
}

type Settle<T, E> = Box<dyn FnOnce(Result<T, E>) + Send>;

struct Inner<T, E> {
    operation: &'static str,
    state: AtomicU8,
    executor: Arc<dyn Executor>,
    settle: Mutex<Option<Settle<T, E>>>,
}

impl<T, E> Drop for Inner<T, E> {
    fn drop(&mut self) {
        let state = OperationState::from_raw(*self.state.get_mut());
        if !state.is_terminal() {
            tracing::warn!(
                operation = self.operation,
                %state,
                "pending operation dropped without being resolved"
            );
        }
    }
}

/// Single-resolution handle for one pending operation.
pub struct Resolver<T, E> {
    inner: Arc<Inner<T, E>>,
}

impl<T, E> Clone for Resolver<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> fmt::Debug for Resolver<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("operation", &self.inner.operation)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl<T, E> Resolver<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a resolver whose single continuation receives the outcome.
    pub fn new<F>(operation: &'static str, executor: Arc<dyn Executor>, settle: F) -> Self
    where
        F: FnOnce(Result<T, E>) + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                operation,
                state: AtomicU8::new(CREATED),
                executor,
                settle: Mutex::new(Some(Box::new(settle))),
            }),
        }
    }

    /// Create a resolver from separate success and failure continuations.
    ///
    /// Exactly one of them is ever invoked.
    pub fn with_callbacks<S, F>(
        operation: &'static str,
        executor: Arc<dyn Executor>,
        on_success: S,
        on_failure: F,
    ) -> Self
    where
        S: FnOnce(T) + Send + 'static,
        F: FnOnce(E) + Send + 'static,
    {
        Self::new(operation, executor, move |outcome| match outcome {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        })
    }
}

impl<T, E> Resolver<T, E> {
    /// Name of the operation this resolver belongs to.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        self.inner.operation
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> OperationState {
        OperationState::from_raw(self.inner.state.load(Ordering::Acquire))
    }

    /// Mark the operation as issued.
    ///
    /// Returns `false` if it was not in the `Created` state.
    pub fn begin(&self) -> bool {
        self.inner
            .state
            .compare_exchange(CREATED, PENDING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl<T, E> Resolver<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Resolve with a success value. Shorthand for `resolve(Ok(value))`.
    pub fn resolve_success(&self, value: T) -> Resolution {
        self.resolve(Ok(value))
    }

    /// Resolve with an error. Shorthand for `resolve(Err(error))`.
    pub fn resolve_failure(&self, error: E) -> Resolution {
        self.resolve(Err(error))
    }

    /// Resolve with `outcome` unless the operation is already resolved.
    ///
    /// The terminal-state transition is a single compare-and-swap, so
    /// concurrent callers agree on one winner. The winner's outcome is
    /// delivered through the executor; the others get
    /// [`Resolution::Ignored`] and their payload is dropped.
    pub fn resolve(&self, outcome: Result<T, E>) -> Resolution {
        let target = if outcome.is_ok() {
            DELIVERED_SUCCESS
        } else {
            DELIVERED_FAILURE
        };

        let mut current = self.inner.state.load(Ordering::Acquire);
        loop {
            let state = OperationState::from_raw(current);
            if state.is_terminal() {
                tracing::warn!(
                    operation = self.inner.operation,
                    %state,
                    attempted_success = outcome.is_ok(),
                    "operation already resolved, ignoring outcome"
                );
                return Resolution::Ignored(state);
            }
            match self.inner.state.compare_exchange_weak(
                current,
                target,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }

        let settle = self
            .inner
            .settle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(settle) = settle {
            self.inner
                .executor
                .execute(Box::new(move || settle(outcome)));
        }
        Resolution::Delivered
    }
}
