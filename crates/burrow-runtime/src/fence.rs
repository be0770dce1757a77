//! Completion fences built on channel disconnection.
//!
//! A fence never carries a message: it completes when its guard is dropped,
//! whether the job finished normally or unwound.

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};

/// Held by the job; dropping it completes every clone of the paired fence.
#[derive(Debug)]
pub struct FenceGuard {
    _tx: Sender<()>,
}

#[derive(Clone, Debug)]
pub struct JobFence {
    rx: Receiver<()>,
}

/// A fresh guard/fence pair.
pub fn fence() -> (FenceGuard, JobFence) {
    let (tx, rx) = bounded(0);
    (FenceGuard { _tx: tx }, JobFence { rx })
}

impl JobFence {
    /// A fence that is already complete.
    pub fn completed() -> Self {
        let (_, fence) = fence();
        fence
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Blocks until the guard is dropped.
    pub fn wait(&self) {
        while self.rx.recv().is_ok() {}
    }
}

impl Default for JobFence {
    fn default() -> Self {
        Self::completed()
    }
}
