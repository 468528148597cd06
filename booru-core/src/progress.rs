use std::fmt::Debug;
use std::sync::Arc;

use booru_common::Booru;

/// Trait for reporting import progress, one batch per imageboard.
/// All methods should be thread-safe.
pub trait ProgressListener: Send + Sync + Debug {
    /// Starts a new batch of `total` posts coming from `booru`.
    fn begin_batch(&self, booru: Booru, total: u64);
    /// Signals that one post of the current batch was processed, whatever the outcome.
    fn main_tick(&self);
    /// Signals that the current batch is complete.
    fn main_done(&self);
}

/// A no-operation implementation of `ProgressListener`.
#[derive(Debug, Clone)]
pub struct NoOpProgressListener;

impl ProgressListener for NoOpProgressListener {
    fn begin_batch(&self, _booru: Booru, _total: u64) {}
    fn main_tick(&self) {}
    fn main_done(&self) {}
}

/// Convenience type alias for a shared, thread-safe progress listener.
pub type SharedProgressListener = Arc<dyn ProgressListener>;

pub fn no_op_progress_listener() -> SharedProgressListener {
    Arc::new(NoOpProgressListener)
}
