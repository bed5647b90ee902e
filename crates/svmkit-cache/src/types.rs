//! Scalar element types for cached columns.

use std::fmt::Debug;

use num_traits::Zero;

/// Scalar element of a cached kernel column (`f32` or `f64` in practice).
///
/// The zero value is used to initialize the arena; cached views start
/// zeroed until the caller fills them.
pub trait Element: Copy + Zero + Debug + Send + Sync + 'static {}

impl Element for f32 {}
impl Element for f64 {}
