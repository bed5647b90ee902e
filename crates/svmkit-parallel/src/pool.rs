//! Long-lived worker threads draining a shared FIFO task queue.
//!
//! The queue is the only state shared between workers; one mutex guards it
//! and a condvar wakes blocked workers. Shutdown is cooperative: dropping
//! the pool lets every task that was already queued run to completion, then
//! joins the workers.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use crate::error::{ExecutorError, ExecutorResult};

/// A deferred zero-argument unit of work.
pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

struct QueueState {
    tasks: VecDeque<Task>,
    stop: bool,
}

struct PoolShared {
    state: Mutex<QueueState>,
    work_available: Condvar,
}

/// Bounded set of long-lived worker threads over a shared FIFO queue.
///
/// Tasks dequeue in submission order, one at a time per worker. Waiting
/// workers block on a condvar; nothing spins. A task that panics is caught
/// and logged, and the worker keeps draining the queue.
///
/// Dropping the pool sets the stop flag, wakes every worker, and joins them.
/// Tasks visible in the queue at that point are drained and executed first;
/// tasks submitted concurrently with or after the stop signal may be
/// silently dropped.
pub struct ThreadPool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawns exactly `threads` named workers immediately.
    ///
    /// # Errors
    ///
    /// [`ExecutorError::NoThreads`] when `threads` is zero, and
    /// [`ExecutorError::Spawn`] when the OS refuses a thread.
    pub fn new(threads: usize) -> ExecutorResult<Self> {
        if threads == 0 {
            return Err(ExecutorError::NoThreads);
        }

        let shared = Arc::new(PoolShared {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                stop: false,
            }),
            work_available: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(threads);
        for id in 0..threads {
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("svmkit-worker-{id}"))
                .spawn(move || worker_loop(&shared, id))?;
            workers.push(handle);
        }
        log::debug!("thread pool started with {threads} workers");

        Ok(Self { shared, workers })
    }

    /// Number of worker threads in the pool.
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Appends a task to the queue and wakes one idle worker.
    ///
    /// Tasks submitted concurrently with or after shutdown may be dropped
    /// without ever executing; the task's captured state is still released
    /// through its destructor.
    pub fn execute<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut state = self.shared.state.lock();
            if state.stop {
                return;
            }
            state.tasks.push_back(Box::new(task));
        }
        self.shared.work_available.notify_one();
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shared.state.lock().stop = true;
        self.shared.work_available.notify_all();

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::error!("worker thread terminated by panic");
            }
        }
    }
}

fn worker_loop(shared: &PoolShared, id: usize) {
    loop {
        let task = {
            let mut state = shared.state.lock();
            loop {
                if let Some(task) = state.tasks.pop_front() {
                    break task;
                }
                if state.stop {
                    log::trace!("worker {id} stopping");
                    return;
                }
                shared.work_available.wait(&mut state);
            }
        };

        // The lock is released while the task runs.
        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            log::error!("worker {id} caught a panicking task");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_zero_threads_rejected() {
        let err = ThreadPool::new(0).err().expect("expected construction to fail");
        assert!(matches!(err, ExecutorError::NoThreads));
    }

    #[test]
    fn test_thread_count() {
        let pool = ThreadPool::new(3).unwrap();
        assert_eq!(pool.thread_count(), 3);
    }

    #[test]
    fn test_tasks_execute() {
        let pool = ThreadPool::new(2).unwrap();
        let (tx, rx) = mpsc::channel();

        for i in 0..10 {
            let tx = tx.clone();
            pool.execute(move || {
                tx.send(i).unwrap();
            });
        }
        drop(tx);

        let mut received: Vec<usize> = Vec::new();
        for _ in 0..10 {
            received.push(rx.recv_timeout(Duration::from_secs(5)).unwrap());
        }
        received.sort_unstable();
        assert_eq!(received, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_fifo_order_single_worker() {
        // With one worker there is no interleaving, so completion order
        // must equal submission order.
        let pool = ThreadPool::new(1).unwrap();
        let (tx, rx) = mpsc::channel();

        for i in 0..20 {
            let tx = tx.clone();
            pool.execute(move || {
                tx.send(i).unwrap();
            });
        }
        drop(tx);
        drop(pool);

        let received: Vec<usize> = rx.iter().collect();
        assert_eq!(received, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_drop_drains_queued_tasks() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = ThreadPool::new(2).unwrap();
            for _ in 0..100 {
                let counter = Arc::clone(&counter);
                pool.execute(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
            // Drop immediately; every queued task must still run.
        }
        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_panicking_task_does_not_kill_worker() {
        let pool = ThreadPool::new(1).unwrap();
        let (tx, rx) = mpsc::channel();

        pool.execute(|| panic!("boom"));
        pool.execute(move || {
            tx.send(42_usize).unwrap();
        });

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
    }
}
