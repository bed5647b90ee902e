//! Parallel execution and kernel-column caching for SVM-style trainers.
//!
//! svmkit bundles the two infrastructure primitives an SVM-style solver
//! leans on every iteration:
//!
//! - **Parallel execution** ([`svmkit_parallel`]): a worker-thread pool
//!   with a FIFO queue and graceful shutdown, plus a blocking executor
//!   that partitions iteration ranges across workers and waits on a
//!   counting barrier.
//! - **Column caching** ([`svmkit_cache`]): a fixed-capacity LRU pool that
//!   hands out fixed-length column views from one pre-allocated arena and
//!   reuses the least-recently-used column when the arena is exhausted.
//!
//! The solver itself (kernel math, working-set selection, convergence)
//! lives in the host crate; svmkit only supplies the machinery underneath.
//!
//! # Example
//!
//! ```
//! use svmkit::prelude::*;
//!
//! // One explicitly owned executor per solver.
//! let executor = ParallelExecutor::with_threads(2)?;
//! executor.run_partitioned(1000, |_id, range| {
//!     for _i in range {
//!         // per-iteration numeric work
//!     }
//! })?;
//!
//! // One cache per kernel matrix.
//! let mut cache = FixedCachePool::<f64>::new(500, 1 << 22)?;
//! let (column, filled) = cache.get_data(42, 500)?;
//! assert!(!filled);
//! column.fill(0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use svmkit_cache as cache;
pub use svmkit_parallel as parallel;

// Re-export the full public surface at the crate root
pub use svmkit_cache::{CacheError, CacheResult, CacheStats, ColumnCache, Element, FixedCachePool};
pub use svmkit_parallel::{
    partition, ExecutorConfig, ExecutorError, ExecutorResult, ParallelExecutor, ThreadPool,
};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use svmkit::prelude::*;
/// ```
pub mod prelude {
    pub use svmkit_cache::{CacheError, CacheStats, ColumnCache, FixedCachePool};
    pub use svmkit_parallel::{
        partition, ExecutorConfig, ExecutorError, ParallelExecutor, ThreadPool,
    };
}
