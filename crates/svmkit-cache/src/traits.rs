//! Capability interface implemented by cache strategies.

use crate::error::CacheResult;
use crate::types::Element;

/// Fetch-or-allocate interface over a kernel-column cache.
///
/// A strategy hands out column views keyed by an integer index fixed at
/// construction. A miss is a normal outcome, not an error: the caller
/// receives an unfilled view of the requested length and must populate it
/// before the next lookup of the same index can be trusted.
pub trait ColumnCache<T: Element> {
    /// Returns the block for `index` and whether it is already filled.
    ///
    /// On a hit the existing view comes back with `true` and the entry
    /// becomes most-recently-used. On a miss the view is freshly carved, or
    /// transferred from the least-recently-used column, and comes back with
    /// `false`.
    fn get_data(&mut self, index: usize, len: usize) -> CacheResult<(&mut [T], bool)>;

    /// Renames cache slot `i` to `j` and vice versa, preserving cached
    /// contents.
    ///
    /// Used when the caller permutes its logical index space, e.g. after
    /// compacting a working set. Implementations may refuse the operation
    /// wholesale; [`crate::FixedCachePool`] does.
    fn swap_index(&mut self, i: usize, j: usize) -> CacheResult<()>;
}
