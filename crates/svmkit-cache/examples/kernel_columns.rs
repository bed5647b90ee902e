//! Caching expensive kernel columns: compute on miss, reuse on hit.
//!
//! Run with: cargo run --example kernel_columns

use svmkit_cache::{CacheResult, ColumnCache, FixedCachePool};

/// Stand-in for an expensive kernel evaluation over one column.
fn compute_column(index: usize, out: &mut [f64]) {
    for (row, v) in out.iter_mut().enumerate() {
        *v = (-((index as f64 - row as f64).powi(2)) / 50.0).exp();
    }
}

fn main() -> CacheResult<()> {
    env_logger::init();

    let columns = 1000;
    let height = 1000;
    // Budget for roughly 100 resident columns.
    let mut cache = FixedCachePool::<f64>::new(columns, 100 * height * 8)?;

    // A working-set-style access pattern: mostly a hot band, occasional
    // excursions that force eviction.
    let mut computed = 0;
    for step in 0..5000 {
        let index = if step % 10 == 0 {
            (step * 37) % columns
        } else {
            step % 64
        };

        let (view, filled) = cache.get_data(index, height)?;
        if !filled {
            compute_column(index, view);
            computed += 1;
        }
    }

    let stats = cache.stats();
    println!(
        "lookups: {}, computed columns: {computed}, hit rate: {:.1}%, evictions: {}",
        stats.hits + stats.misses,
        stats.hit_rate() * 100.0,
        stats.evictions
    );
    Ok(())
}
