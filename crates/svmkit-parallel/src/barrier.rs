//! Counting barrier shared by the executor's blocking entry points.
//!
//! One barrier per `run_*` invocation: initialized to the number of
//! submitted work units, decremented once per unit, waited on by the
//! initiating thread. Decrement happens in a drop guard, so a unit that
//! panics, or is discarded during pool shutdown without ever running,
//! still releases the waiter.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

struct BarrierState {
    remaining: usize,
    first_failure: Option<String>,
}

/// Blocks the initiating thread until a known number of work units finish.
pub(crate) struct CompletionBarrier {
    state: Mutex<BarrierState>,
    all_done: Condvar,
}

impl CompletionBarrier {
    pub(crate) fn new(count: usize) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(BarrierState {
                remaining: count,
                first_failure: None,
            }),
            all_done: Condvar::new(),
        })
    }

    /// Blocks until every unit has completed, then yields the first
    /// recorded failure, if any.
    pub(crate) fn wait(&self) -> Option<String> {
        let mut state = self.state.lock();
        while state.remaining > 0 {
            self.all_done.wait(&mut state);
        }
        state.first_failure.take()
    }

    fn complete_one(&self) {
        let mut state = self.state.lock();
        state.remaining -= 1;
        if state.remaining == 0 {
            self.all_done.notify_one();
        }
    }

    fn record_failure(&self, message: String) {
        let mut state = self.state.lock();
        if state.first_failure.is_none() {
            state.first_failure = Some(message);
        }
    }
}

/// Decrements its barrier exactly once, when dropped.
pub(crate) struct CompletionGuard {
    barrier: Arc<CompletionBarrier>,
}

impl CompletionGuard {
    pub(crate) fn new(barrier: Arc<CompletionBarrier>) -> Self {
        Self { barrier }
    }

    /// Records the first failure of the run; later calls are ignored.
    pub(crate) fn record_failure(&self, message: String) {
        self.barrier.record_failure(message);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.barrier.complete_one();
    }
}
