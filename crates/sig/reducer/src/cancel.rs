//! Cooperative cancellation of in-flight reductions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flag shared between a reducer and the party that may invalidate its input.
///
/// The reducer polls the token once per round. Once set, the token stays set;
/// create a fresh one for the next pass.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
