//! Shared utilities for TwinScan crates.
//!
//! Currently this is the progress/cancellation callback seam used by
//! long-running operations, plus test helpers behind the `testutils`
//! feature.

#![forbid(unsafe_code)]

pub mod progress;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
