//! Worker-thread pool and blocking parallel executor for SVM-style trainers.
//!
//! This crate provides the parallel-execution half of svmkit. A trainer's
//! inner loop repeatedly fans the same shape of numeric work out across a
//! bounded set of threads: compute something for every iteration index,
//! wait for all of it, move on. The pieces here are sized for exactly that
//! pattern and nothing more.
//!
//! # Modules
//!
//! - [`pool`]: long-lived worker threads draining a shared FIFO task queue
//! - [`executor`]: blocking fan-out layered on the pool
//! - [`partition`]: iteration-range partitioning across worker ids
//! - [`error`]: error types
//!
//! # Example
//!
//! ```
//! use svmkit_parallel::ParallelExecutor;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let executor = ParallelExecutor::with_threads(4)?;
//! let counter = Arc::new(AtomicUsize::new(0));
//! let seen = Arc::clone(&counter);
//! executor.run_over_ids(4, move |_id| {
//!     seen.fetch_add(1, Ordering::SeqCst);
//! })?;
//! assert_eq!(counter.load(Ordering::SeqCst), 4);
//! # Ok::<(), svmkit_parallel::ExecutorError>(())
//! ```

pub mod error;
pub mod executor;
pub mod partition;
pub mod pool;

mod barrier;

// Re-export commonly used items at the crate root
pub use error::{ExecutorError, ExecutorResult};
pub use executor::{ExecutorConfig, ParallelExecutor};
pub use partition::partition;
pub use pool::ThreadPool;
