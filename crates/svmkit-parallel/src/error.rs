//! Error types for the worker pool and parallel executor.

use thiserror::Error;

/// Errors raised by pool construction and barrier-based runs.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The pool was asked for zero worker threads.
    ///
    /// A pool with no workers would accept tasks that can never execute,
    /// so construction refuses it outright.
    #[error("thread pool requires at least one worker thread")]
    NoThreads,

    /// The operating system refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// A submitted task panicked.
    ///
    /// The run still waited for every task to finish; this reports the
    /// first captured panic of the batch.
    #[error("task panicked: {message}")]
    TaskPanicked {
        /// Payload of the first panic, if it carried a message.
        message: String,
    },
}

impl ExecutorError {
    /// Create a TaskPanicked error from a captured panic message.
    pub fn task_panicked<S: Into<String>>(message: S) -> Self {
        Self::TaskPanicked {
            message: message.into(),
        }
    }
}

/// Result type alias for executor operations.
pub type ExecutorResult<T> = std::result::Result<T, ExecutorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            ExecutorError::NoThreads,
            ExecutorError::task_panicked("index out of bounds"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_task_panicked_carries_message() {
        let err = ExecutorError::task_panicked("kernel column was NaN");
        assert!(err.to_string().contains("kernel column was NaN"));
    }
}
