//! Contact cache contract and the in-memory implementation.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::warn;

use crate::api::ApiFuture;
use crate::source::SourceError;
use crate::Contact;

/// Last-known-good contact storage.
///
/// `save` is treated as fire-and-forget by its callers: its error is logged,
/// never surfaced to a load.
pub trait ContactCache: Send + Sync {
    fn save<'a>(&'a self, contacts: Vec<Contact>) -> ApiFuture<'a, ()>;

    /// # Errors
    ///
    /// Returns a `CacheMiss` [`SourceError`] when nothing usable is cached.
    fn load<'a>(&'a self) -> ApiFuture<'a, Vec<Contact>>;
}

#[derive(Debug, Clone)]
struct CacheEntry {
    contacts: Vec<Contact>,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    entry: Option<CacheEntry>,
    ttl: Duration,
}

/// Thread-safe in-memory contact cache with a time-to-live.
#[derive(Debug, Clone)]
pub struct MemoryContactCache {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl MemoryContactCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner { entry: None, ttl })),
        }
    }

    /// Create a cache whose entries live for 24 hours.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60))
    }

    /// Create a cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub async fn is_disabled(&self) -> bool {
        self.inner.read().await.ttl == Duration::ZERO
    }

    pub async fn clear(&self) {
        self.inner.write().await.entry = None;
    }
}

impl Default for MemoryContactCache {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}

impl ContactCache for MemoryContactCache {
    fn save<'a>(&'a self, contacts: Vec<Contact>) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let mut store = self.inner.write().await;
            if store.ttl == Duration::ZERO {
                return Ok(());
            }
            let expires_at = Instant::now() + store.ttl;
            store.entry = Some(CacheEntry {
                contacts,
                expires_at,
            });
            Ok(())
        })
    }

    fn load<'a>(&'a self) -> ApiFuture<'a, Vec<Contact>> {
        Box::pin(async move {
            let store = self.inner.read().await;
            match &store.entry {
                Some(entry) if Instant::now() <= entry.expires_at => Ok(entry.contacts.clone()),
                Some(_) => Err(SourceError::cache_miss("cached contacts have expired")),
                None => Err(SourceError::cache_miss("no contacts have been cached")),
            }
        })
    }
}

/// Background cache saves started by remote contact loads.
///
/// Loads never wait on a save. A short-lived process that wants the save to
/// land before it exits awaits [`PendingSaves::wait`].
#[derive(Debug, Clone, Default)]
pub struct PendingSaves {
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl PendingSaves {
    pub(crate) fn track(&self, handle: JoinHandle<()>) {
        if let Ok(mut handles) = self.handles.lock() {
            handles.retain(|handle| !handle.is_finished());
            handles.push(handle);
        }
    }

    /// Number of saves that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.handles.lock().map_or(0, |handles| {
            handles.iter().filter(|handle| !handle.is_finished()).count()
        })
    }

    /// Waits for every save tracked so far.
    pub async fn wait(&self) {
        let handles = match self.handles.lock() {
            Ok(mut handles) => std::mem::take(&mut *handles),
            Err(_) => Vec::new(),
        };
        for handle in handles {
            if let Err(error) = handle.await {
                warn!(%error, "contact cache save task did not complete");
            }
        }
    }
}
