//! Blocking fan-out execution on top of the worker pool.
//!
//! Every `run_*` call follows the same discipline: submit N work units to
//! the pool, block on a counting barrier until all N have finished, then
//! surface the first captured task panic, if any.

use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::barrier::{CompletionBarrier, CompletionGuard};
use crate::error::{ExecutorError, ExecutorResult};
use crate::partition::partition;
use crate::pool::ThreadPool;

/// Configuration for building a [`ParallelExecutor`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutorConfig {
    /// Number of worker threads (None = detected hardware concurrency).
    pub num_threads: Option<usize>,
}

impl ExecutorConfig {
    /// Create a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit worker count.
    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Worker count this configuration resolves to.
    pub fn resolved_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get)
    }
}

/// Blocking fan-out executor over an owned [`ThreadPool`].
///
/// The executor is an explicitly constructed, explicitly owned value; create
/// one per solver (or share a reference) instead of reaching for a global.
/// Its pool is sized once at construction and never resized.
///
/// `run_*` calls are re-entrant. Two callers sharing one executor are safe
/// but interleave their tasks on the same queue with no cross-call ordering;
/// serialize externally if that matters. Run calls block the invoking
/// thread until the batch completes, so they must not be issued from inside
/// a task of the same executor.
pub struct ParallelExecutor {
    pool: ThreadPool,
}

impl ParallelExecutor {
    /// Creates an executor sized to the detected hardware concurrency.
    pub fn new() -> ExecutorResult<Self> {
        Self::with_threads(num_cpus::get())
    }

    /// Creates an executor with an explicit worker count.
    pub fn with_threads(threads: usize) -> ExecutorResult<Self> {
        Ok(Self {
            pool: ThreadPool::new(threads)?,
        })
    }

    /// Creates an executor from a configuration.
    pub fn with_config(config: &ExecutorConfig) -> ExecutorResult<Self> {
        Self::with_threads(config.resolved_threads())
    }

    /// Number of worker threads; the `C` used by [`Self::partition`].
    pub fn num_threads(&self) -> usize {
        self.pool.thread_count()
    }

    /// Partition of `[0, n)` owned by `thread_id` on this executor.
    ///
    /// Convenience over the free [`partition`] function with
    /// `total_threads = self.num_threads()`.
    pub fn partition(&self, thread_id: usize, n: usize) -> Range<usize> {
        partition(thread_id, self.num_threads(), n)
    }

    /// Invokes `f(thread_id)` once per id in `[0, total_threads)` and blocks
    /// until every invocation has finished.
    ///
    /// `total_threads` is a task count, not a pool size: passing more ids
    /// than workers just queues the excess. Zero ids returns immediately.
    ///
    /// # Errors
    ///
    /// [`ExecutorError::TaskPanicked`] carrying the first panic of the
    /// batch; the call still waited for every invocation.
    pub fn run_over_ids<F>(&self, total_threads: usize, f: F) -> ExecutorResult<()>
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        if total_threads == 0 {
            return Ok(());
        }

        let barrier = CompletionBarrier::new(total_threads);
        let f = Arc::new(f);
        for thread_id in 0..total_threads {
            let guard = CompletionGuard::new(Arc::clone(&barrier));
            let f = Arc::clone(&f);
            self.pool.execute(move || run_unit(guard, move || f(thread_id)));
        }

        finish(&barrier)
    }

    /// Runs one `(function, argument)` pair per work item and blocks until
    /// all of them have finished.
    ///
    /// An empty list returns immediately without touching the pool.
    pub fn run_work_items<T, F>(&self, items: Vec<(F, T)>) -> ExecutorResult<()>
    where
        F: FnOnce(T) + Send + 'static,
        T: Send + 'static,
    {
        if items.is_empty() {
            return Ok(());
        }

        let barrier = CompletionBarrier::new(items.len());
        for (func, arg) in items {
            let guard = CompletionGuard::new(Arc::clone(&barrier));
            self.pool.execute(move || run_unit(guard, move || func(arg)));
        }

        finish(&barrier)
    }

    /// Invokes `f(thread_id, range)` once per worker id, where `range` is
    /// that id's [`partition`] of `[0, n)`.
    ///
    /// This is the classic parallel-for of the consuming trainer: each
    /// worker walks its own slice of the iteration space.
    pub fn run_partitioned<F>(&self, n: usize, f: F) -> ExecutorResult<()>
    where
        F: Fn(usize, Range<usize>) + Send + Sync + 'static,
    {
        let total = self.num_threads();
        self.run_over_ids(total, move |thread_id| {
            f(thread_id, partition(thread_id, total, n));
        })
    }
}

/// Runs one work unit, recording its panic (if any) before the guard drops.
fn run_unit<F: FnOnce()>(guard: CompletionGuard, unit: F) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(unit)) {
        guard.record_failure(panic_message(payload.as_ref()));
    }
}

fn finish(barrier: &CompletionBarrier) -> ExecutorResult<()> {
    match barrier.wait() {
        None => Ok(()),
        Some(message) => Err(ExecutorError::TaskPanicked { message }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_run_over_ids_invokes_each_id_once() {
        let executor = ParallelExecutor::with_threads(4).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        executor
            .run_over_ids(8, move |id| {
                sink.lock().unwrap().push(id);
            })
            .unwrap();

        let mut ids = seen.lock().unwrap().clone();
        ids.sort_unstable();
        assert_eq!(ids, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_run_over_ids_zero_ids() {
        let executor = ParallelExecutor::with_threads(2).unwrap();
        executor.run_over_ids(0, |_| panic!("must not run")).unwrap();
    }

    #[test]
    fn test_run_work_items() {
        let executor = ParallelExecutor::with_threads(3).unwrap();
        let total = Arc::new(AtomicUsize::new(0));

        let items: Vec<_> = (1..=10)
            .map(|value| {
                let total = Arc::clone(&total);
                (
                    move |v: usize| {
                        total.fetch_add(v, Ordering::SeqCst);
                    },
                    value,
                )
            })
            .collect();

        executor.run_work_items(items).unwrap();
        assert_eq!(total.load(Ordering::SeqCst), 55);
    }

    #[test]
    fn test_run_work_items_empty_returns_immediately() {
        let executor = ParallelExecutor::with_threads(2).unwrap();
        let items: Vec<(fn(usize), usize)> = Vec::new();
        executor.run_work_items(items).unwrap();
    }

    #[test]
    fn test_first_panic_surfaces_after_barrier() {
        let executor = ParallelExecutor::with_threads(2).unwrap();
        let ran = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&ran);
        let err = executor
            .run_over_ids(6, move |id| {
                if id == 0 {
                    panic!("bad column");
                }
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap_err();

        assert!(matches!(err, ExecutorError::TaskPanicked { .. }));
        assert!(err.to_string().contains("bad column"));
        // The run waited for the whole batch, panic included.
        assert_eq!(ran.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_partition_method_uses_pool_size() {
        let executor = ParallelExecutor::with_threads(4).unwrap();
        assert_eq!(executor.partition(0, 100), 0..25);
        assert_eq!(executor.partition(3, 100), 75..100);
    }

    #[test]
    fn test_run_partitioned_covers_iteration_space() {
        let executor = ParallelExecutor::with_threads(4).unwrap();
        let n = 1003;
        let hits = Arc::new(Mutex::new(vec![0_u8; n]));

        let sink = Arc::clone(&hits);
        executor
            .run_partitioned(n, move |_id, range| {
                let mut hits = sink.lock().unwrap();
                for i in range {
                    hits[i] += 1;
                }
            })
            .unwrap();

        assert!(hits.lock().unwrap().iter().all(|&c| c == 1));
    }

    #[test]
    fn test_config_builder() {
        let config = ExecutorConfig::new().with_num_threads(2);
        assert_eq!(config.resolved_threads(), 2);

        let executor = ParallelExecutor::with_config(&config).unwrap();
        assert_eq!(executor.num_threads(), 2);
    }

    #[test]
    fn test_default_config_uses_hardware_concurrency() {
        let config = ExecutorConfig::new();
        assert!(config.resolved_threads() >= 1);
    }
}
