//! Error types for column caches.

use thiserror::Error;

/// Errors raised by cache construction and lookups.
///
/// Every variant is a contract violation the caller cannot meaningfully
/// retry. The host process decides whether to abort; the library never
/// degrades a broken invariant into a soft fallback, since continuing
/// would silently corrupt later computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The arena reservation was refused by the allocator.
    #[error("cache arena allocation of {bytes} bytes failed")]
    AllocationFailed {
        /// Size of the refused reservation.
        bytes: usize,
    },

    /// The least-recently-used column does not match the requested length.
    ///
    /// A fixed-size pool only reuses same-length blocks; hitting this means
    /// the caller mixed column heights within one pool.
    #[error(
        "cannot reuse column {evicted} (length {cached}) for a request of \
         length {requested}; fixed-size pools only reuse same-length columns"
    )]
    LengthMismatch {
        /// Index whose block was chosen for eviction.
        evicted: usize,
        /// Length of the block being evicted.
        cached: usize,
        /// Length the caller asked for.
        requested: usize,
    },

    /// The requested length exceeds what the arena can ever hold at once.
    #[error("requested column length {requested} exceeds usable arena capacity {capacity}")]
    ColumnTooLarge {
        /// Length the caller asked for.
        requested: usize,
        /// Total arena capacity in elements.
        capacity: usize,
    },

    /// `swap_index` called on a pool that does not support renaming.
    #[error("swap_index is not supported by a fixed-size cache pool")]
    SwapUnsupported,
}

impl CacheError {
    /// Create an AllocationFailed error for a refused reservation.
    pub fn allocation_failed(bytes: usize) -> Self {
        Self::AllocationFailed { bytes }
    }

    /// Create a LengthMismatch error naming the offending indices.
    pub fn length_mismatch(evicted: usize, cached: usize, requested: usize) -> Self {
        Self::LengthMismatch {
            evicted,
            cached,
            requested,
        }
    }

    /// Create a ColumnTooLarge error for an oversized request.
    pub fn column_too_large(requested: usize, capacity: usize) -> Self {
        Self::ColumnTooLarge {
            requested,
            capacity,
        }
    }
}

/// Result type alias for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
