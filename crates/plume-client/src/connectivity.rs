//! Externally driven connectivity state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Cloneable handle on the process-wide online/offline flag.
///
/// The signal is owned by whatever detects reachability (the CLI flag, a
/// platform hook); the sync coordinator only samples it. Every observable
/// flip bumps an epoch counter, which in-flight operations use to detect
/// that their result belongs to a world that no longer exists.
#[derive(Clone, Debug)]
pub struct ConnectivitySignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    online: AtomicBool,
    epoch: AtomicU64,
}

/// The signal state sampled at the start of an operation.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub online: bool,
    pub epoch: u64,
}

impl ConnectivitySignal {
    pub fn new(online: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                online: AtomicBool::new(online),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Flip the flag; a no-op set does not advance the epoch.
    pub fn set_online(&self, online: bool) {
        let previous = self.inner.online.swap(online, Ordering::SeqCst);
        if previous != online {
            self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }

    pub fn observe(&self) -> Observation {
        Observation {
            online: self.is_online(),
            epoch: self.epoch(),
        }
    }
}

impl Default for ConnectivitySignal {
    fn default() -> Self {
        Self::new(true)
    }
}
