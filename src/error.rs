//! Public error type for [`crate::compute`].
//!
//! Only the `InvalidInput` branch of the error design (§7) is a real
//! error variant. `Degenerate` inputs (colinear or coincident sites)
//! are a valid computed result, not an error, and never surface here.
//! `InternalInvariant` violations are programmer errors caught by
//! `debug_assert!` in debug builds; they have no variant either, since
//! a release build never raises them.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VoronoiError {
    #[error("no sites were supplied")]
    EmptyInput,

    #[error("site at index {index} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },
}
