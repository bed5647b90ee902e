//! Fixed-size LRU cache pool over one pre-allocated arena.
//!
//! The arena is carved monotonically from a high-water mark. Once the
//! unallocated remainder cannot satisfy a request, the least-recently-used
//! column is reused in place, strictly at the same length. The consuming
//! workload always requests full-height kernel columns, so a bump allocator
//! plus same-length reuse needs no free list and can never fragment.
//!
//! Recency is tracked by a circular doubly linked list threaded through the
//! entry table with a sentinel node; links are table indices, not pointers.

use std::mem;

use crate::error::{CacheError, CacheResult};
use crate::traits::ColumnCache;
use crate::types::Element;

/// Entry table node; `len == 0` means the column is absent and unlinked.
#[derive(Debug, Clone, Copy)]
struct Entry {
    prev: usize,
    next: usize,
    offset: usize,
    len: usize,
}

/// Counters and occupancy snapshot of a [`FixedCachePool`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    /// Lookups that found a filled column.
    pub hits: u64,
    /// Lookups that handed out an unfilled view.
    pub misses: u64,
    /// Misses served by reusing the least-recently-used column.
    pub evictions: u64,
    /// Columns currently cached.
    pub cached_columns: usize,
    /// Total arena capacity in elements.
    pub arena_elements: usize,
    /// Arena elements not yet carved from the high-water mark.
    pub remaining_elements: usize,
}

impl CacheStats {
    /// Hit fraction over all lookups so far; zero before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of the arena already carved into columns.
    pub fn utilization(&self) -> f64 {
        if self.arena_elements == 0 {
            0.0
        } else {
            (self.arena_elements - self.remaining_elements) as f64 / self.arena_elements as f64
        }
    }
}

/// Fixed-capacity column cache backed by a single pre-allocated arena.
///
/// Built for the workload where every request has the same length (one
/// full kernel column): eviction transfers a block to a new index without
/// any resizing, and `swap_index` is refused by contract.
///
/// Not internally synchronized. `get_data` takes `&mut self`, so exclusive
/// access is enforced at compile time; to share a pool across threads, wrap
/// it in a lock or give each worker its own pool.
pub struct FixedCachePool<T> {
    /// One entry per column, plus the LRU sentinel at index `columns`.
    entries: Vec<Entry>,
    arena: Vec<T>,
    next_pos: usize,
    remaining: usize,
    columns: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<T: Element> FixedCachePool<T> {
    /// Pre-allocates an arena for `columns` logical indices from a byte-size
    /// hint.
    ///
    /// The element budget is the hint divided by the element size, less the
    /// entry-table overhead, raised to a floor of two full-length columns.
    /// The floor guarantees progress: a caller alternating between two
    /// columns can never starve the pool.
    ///
    /// # Errors
    ///
    /// [`CacheError::AllocationFailed`] if the arena reservation is refused
    /// by the allocator.
    ///
    /// # Panics
    ///
    /// Panics if `columns` is zero.
    pub fn new(columns: usize, capacity_bytes: usize) -> CacheResult<Self> {
        assert!(columns > 0, "cache pool requires at least one column index");

        let elem_size = mem::size_of::<T>();
        let overhead = columns * mem::size_of::<Entry>() / elem_size;
        let elements = (capacity_bytes / elem_size)
            .saturating_sub(overhead)
            .max(2 * columns);

        let mut arena = Vec::new();
        arena
            .try_reserve_exact(elements)
            .map_err(|_| CacheError::allocation_failed(elements * elem_size))?;
        arena.resize(elements, T::zero());
        log::debug!(
            "cache pool arena: {elements} elements ({} bytes) across {columns} columns",
            elements * elem_size
        );

        let sentinel = columns;
        let entries = vec![
            Entry {
                prev: sentinel,
                next: sentinel,
                offset: 0,
                len: 0,
            };
            columns + 1
        ];

        Ok(Self {
            entries,
            arena,
            next_pos: 0,
            remaining: elements,
            columns,
            hits: 0,
            misses: 0,
            evictions: 0,
        })
    }

    /// Number of logical column indices.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total arena capacity in elements.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    /// Arena elements not yet carved from the high-water mark.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Whether `index` currently holds a filled column.
    pub fn is_cached(&self, index: usize) -> bool {
        self.entries[index].len != 0
    }

    /// Counters and occupancy snapshot.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            cached_columns: self.entries[..self.columns]
                .iter()
                .filter(|e| e.len != 0)
                .count(),
            arena_elements: self.arena.len(),
            remaining_elements: self.remaining,
        }
    }

    fn sentinel(&self) -> usize {
        self.columns
    }

    /// Index of the least-recently-used column, if any column is cached.
    fn lru_index(&self) -> Option<usize> {
        let head = self.entries[self.sentinel()].next;
        (head != self.sentinel()).then_some(head)
    }

    fn unlink(&mut self, index: usize) {
        let Entry { prev, next, .. } = self.entries[index];
        self.entries[prev].next = next;
        self.entries[next].prev = prev;
    }

    /// Links `index` at the most-recently-used end of the list.
    fn link_mru(&mut self, index: usize) {
        let sentinel = self.sentinel();
        let tail = self.entries[sentinel].prev;
        self.entries[index].next = sentinel;
        self.entries[index].prev = tail;
        self.entries[tail].next = index;
        self.entries[sentinel].prev = index;
    }
}

impl<T: Element> ColumnCache<T> for FixedCachePool<T> {
    fn get_data(&mut self, index: usize, len: usize) -> CacheResult<(&mut [T], bool)> {
        assert!(
            index < self.columns,
            "column index {index} out of range for {} columns",
            self.columns
        );
        assert!(len > 0, "column length must be non-zero");

        let filled = self.entries[index].len != 0;
        if filled {
            debug_assert_eq!(self.entries[index].len, len);
            self.hits += 1;
            self.unlink(index);
        } else {
            self.misses += 1;
            if self.remaining < len {
                // Reuse the least-recently-used block in place.
                let victim = self
                    .lru_index()
                    .ok_or_else(|| CacheError::column_too_large(len, self.arena.len()))?;
                let cached = self.entries[victim].len;
                if cached != len {
                    return Err(CacheError::length_mismatch(victim, cached, len));
                }
                self.unlink(victim);
                self.entries[index].offset = self.entries[victim].offset;
                self.entries[index].len = cached;
                self.entries[victim].len = 0;
                self.evictions += 1;
            } else {
                // Carve a fresh block from the high-water mark.
                self.entries[index].offset = self.next_pos;
                self.entries[index].len = len;
                self.next_pos += len;
                self.remaining -= len;
            }
        }
        self.link_mru(index);

        let Entry { offset, len, .. } = self.entries[index];
        Ok((&mut self.arena[offset..offset + len], filled))
    }

    fn swap_index(&mut self, _i: usize, _j: usize) -> CacheResult<()> {
        // Renaming indices mid-flight would break the eviction invariant;
        // only pool variants that tolerate shrinking support it.
        Err(CacheError::SwapUnsupported)
    }
}
