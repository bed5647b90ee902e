//! Partitioned reduction: each worker sums its own slice of the iteration
//! space, then the partial sums are combined.
//!
//! Run with: cargo run --example partitioned_sum

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use svmkit_parallel::{ExecutorResult, ParallelExecutor};

fn main() -> ExecutorResult<()> {
    env_logger::init();

    let executor = ParallelExecutor::new()?;
    let n = 10_000_000_u64;

    let total = Arc::new(AtomicU64::new(0));
    let sink = Arc::clone(&total);
    executor.run_partitioned(n as usize, move |id, range| {
        let local: u64 = range.map(|i| i as u64).sum();
        println!("worker {id} summed {local} over its range");
        sink.fetch_add(local, Ordering::Relaxed);
    })?;

    let expected = n * (n - 1) / 2;
    println!("total = {} (expected {expected})", total.load(Ordering::Relaxed));
    assert_eq!(total.load(Ordering::Relaxed), expected);
    Ok(())
}
