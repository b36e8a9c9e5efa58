//! Progress and cancellation callbacks for long-running operations.
//!
//! Long-running operations (e.g. encrypting a whole report file) report their
//! progress through the [Progress] trait and poll it for cooperative
//! cancellation. Rendering a progress bar is the job of the caller (the
//! desktop shell); this crate only provides the callback seam plus two
//! ready-made implementations.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Callback interface for chunk-level progress reporting.
///
/// Implementations must be usable from the thread running the operation.
/// Cancellation is cooperative and coarse-grained: operations only check
/// [Progress::is_cancelled] between chunks, never inside a single transform.
pub trait Progress: Sync {
    /// Called after each processed chunk with the total number of chunks
    /// processed so far.
    fn chunk_processed(&self, chunks_done: u64) {
        let _ = chunks_done;
    }

    /// Returns `true` if the caller requested cancellation. The operation
    /// aborts at the next chunk boundary.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// A [Progress] implementation that ignores all callbacks.
pub struct NoProgress;

impl Progress for NoProgress {}

/// A [Progress] implementation that counts chunks and supports cancellation
/// from another thread.
#[derive(Default)]
pub struct CountingProgress {
    chunks: AtomicU64,
    cancelled: AtomicBool,
}

impl CountingProgress {
    /// Creates a new counter with zero chunks processed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chunks reported so far.
    pub fn chunks(&self) -> u64 {
        self.chunks.load(Ordering::Relaxed)
    }

    /// Requests cancellation of the operation using this progress object.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Progress for CountingProgress {
    fn chunk_processed(&self, chunks_done: u64) {
        self.chunks.store(chunks_done, Ordering::Relaxed);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
