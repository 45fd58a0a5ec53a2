//! Generic loading state machine for server-owned collections.
//!
//! Every list page drives the same cycle: `idle → loading → (loaded |
//! error)`, re-entered on refetch and after successful mutations. A load
//! that fails never strands the state in `loading`, and a response that
//! completes after a newer load has begun is discarded, so overlapping
//! requests cannot clobber fresher data.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{ApiError, PageError};
use crate::invalidation::InvalidationBus;

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Idle,
    Loading,
    Loaded(Vec<T>),
    Failed(PageError),
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }
}

/// Ticket for one load attempt. A finish with a stale ticket is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// State container for one resource key.
pub struct ResourceLoader<T> {
    key: String,
    bus: Arc<InvalidationBus>,
    state: RwLock<ResourceState<T>>,
    epoch: AtomicU64,
    seen_generation: AtomicU64,
}

impl<T: Clone> ResourceLoader<T> {
    pub fn new(key: impl Into<String>, bus: Arc<InvalidationBus>) -> Self {
        Self {
            key: key.into(),
            bus,
            state: RwLock::new(ResourceState::Idle),
            epoch: AtomicU64::new(0),
            seen_generation: AtomicU64::new(0),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ResourceState<T> {
        self.state.read().clone()
    }

    /// The loaded collection, or empty when not loaded. Pages render an
    /// empty list for idle/loading/error and surface the error separately.
    pub fn items(&self) -> Vec<T> {
        match &*self.state.read() {
            ResourceState::Loaded(items) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    pub fn error(&self) -> Option<PageError> {
        match &*self.state.read() {
            ResourceState::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }

    /// True when a mutation has invalidated this resource since it was
    /// last loaded.
    pub fn is_stale(&self) -> bool {
        self.bus.generation(&self.key) > self.seen_generation.load(Ordering::Acquire)
    }

    /// Begin a load attempt: enter `loading` and supersede any in-flight
    /// attempt. The returned ticket must be handed to [`finish`].
    ///
    /// [`finish`]: ResourceLoader::finish
    pub fn begin(&self) -> LoadTicket {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        *self.state.write() = ResourceState::Loading;
        LoadTicket(epoch)
    }

    /// Publish the outcome of a load attempt. A stale ticket (a newer
    /// attempt began while this one was in flight) is discarded without
    /// touching state.
    pub fn finish(
        &self,
        ticket: LoadTicket,
        result: Result<Vec<T>, ApiError>,
    ) -> Result<(), PageError> {
        if ticket.0 != self.epoch.load(Ordering::Acquire) {
            log::debug!("Discarding superseded load for {}", self.key);
            return Ok(());
        }

        match result {
            Ok(items) => {
                self.seen_generation
                    .store(self.bus.generation(&self.key), Ordering::Release);
                *self.state.write() = ResourceState::Loaded(items);
                Ok(())
            }
            Err(err) => {
                let page: PageError = err.into();
                *self.state.write() = ResourceState::Failed(page.clone());
                Err(page)
            }
        }
    }

    /// Run one full load: a single fetch attempt, no retry, no backoff.
    pub async fn run<F>(&self, fetch: F) -> Result<(), PageError>
    where
        F: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let ticket = self.begin();
        let result = fetch.await;
        self.finish(ticket, result)
    }
}
