//! Fixed-capacity kernel-column caching for SVM-style trainers.
//!
//! A trainer's inner loop repeatedly needs columns of a kernel matrix that
//! are expensive to compute and collectively too large to keep resident.
//! This crate pre-allocates one arena, hands out fixed-length column views
//! keyed by column index, and reuses the least-recently-used column in
//! place when the arena runs out.
//!
//! A miss is not an error: the caller receives an unfilled view and fills
//! it once; subsequent lookups of the same index are hits until the column
//! is evicted.
//!
//! # Modules
//!
//! - [`traits`]: the capability interface implemented by cache strategies
//! - [`fixed_pool`]: the arena-backed fixed pool
//! - [`types`]: scalar element types for cached columns
//! - [`error`]: error types
//!
//! # Example
//!
//! ```
//! use svmkit_cache::{ColumnCache, FixedCachePool};
//!
//! let mut cache = FixedCachePool::<f32>::new(100, 1 << 20)?;
//! let (column, filled) = cache.get_data(7, 100)?;
//! assert!(!filled);
//! column.fill(1.5); // caller computes the column once
//!
//! let (column, filled) = cache.get_data(7, 100)?;
//! assert!(filled);
//! assert_eq!(column[0], 1.5);
//! # Ok::<(), svmkit_cache::CacheError>(())
//! ```

pub mod error;
pub mod fixed_pool;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{CacheError, CacheResult};
pub use fixed_pool::{CacheStats, FixedCachePool};
pub use traits::ColumnCache;
pub use types::Element;
