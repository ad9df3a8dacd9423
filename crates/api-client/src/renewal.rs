//! Single-flight credential renewal.
//!
//! Every request samples [`RenewalCoordinator::generation`] before it is sent.
//! When it comes back 401 it calls [`RenewalCoordinator::renew`] with that
//! sample. The first caller performs the renewal while holding the lock; every
//! caller whose sample is older than the current generation reuses the last
//! outcome instead of renewing again.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Result of one renewal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalOutcome {
    /// New access token stored; replay the request.
    Renewed,
    /// Credentials cleared; the session is over.
    Failed,
}

#[derive(Debug)]
pub(crate) struct RenewalCoordinator {
    generation: AtomicU64,
    last_outcome: Mutex<RenewalOutcome>,
}

impl RenewalCoordinator {
    pub(crate) fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            // Unread until the first renewal bumps the generation.
            last_outcome: Mutex::new(RenewalOutcome::Failed),
        }
    }

    /// Number of renewals completed so far.
    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Run `perform` unless a renewal completed after `observed` was sampled.
    pub(crate) async fn renew<F, Fut>(&self, observed: u64, perform: F) -> RenewalOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RenewalOutcome>,
    {
        let mut last_outcome = self.last_outcome.lock().await;

        if self.generation.load(Ordering::Acquire) != observed {
            return *last_outcome;
        }

        let outcome = perform().await;
        *last_outcome = outcome;
        self.generation.fetch_add(1, Ordering::AcqRel);
        outcome
    }
}
