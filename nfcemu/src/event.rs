// nfcemu/src/event.rs
//! One-shot signalable event used for range notifications.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// One-shot event: `signal` latches it and the next observation clears
/// it. The module core only ever signals; waiting is the transport's
/// responsibility, as is re-arming a consumer that wants level semantics.
#[derive(Debug)]
pub struct SignalEvent {
    name: &'static str,
    signaled: Mutex<bool>,
    cond: Condvar,
}

impl SignalEvent {
    /// Create an unsignaled event under a diagnostic name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            signaled: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    /// Diagnostic name the event was created with.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Latch the event and wake any waiter.
    pub fn signal(&self) {
        *lock(&self.signaled) = true;
        self.cond.notify_all();
    }

    /// Block until signaled, consuming the signal.
    pub fn wait(&self) {
        let mut signaled = lock(&self.signaled);
        while !*signaled {
            signaled = self
                .cond
                .wait(signaled)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *signaled = false;
    }

    /// Consume the signal if latched; returns whether it was.
    pub fn try_take(&self) -> bool {
        let mut signaled = lock(&self.signaled);
        std::mem::replace(&mut *signaled, false)
    }
}

fn lock<'a>(flag: &'a Mutex<bool>) -> MutexGuard<'a, bool> {
    flag.lock().unwrap_or_else(PoisonError::into_inner)
}
