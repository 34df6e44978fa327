//! Designated delivery context for load completions.
//!
//! A [`DeliveryContext`] owns one dedicated thread, the equivalent of a UI
//! main thread. Every completion handed to [`ItemsLoader::load_items`] runs
//! there, whichever runtime worker resolved the underlying collaborator call.

use std::sync::Arc;
use std::thread::{self, ThreadId};

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, warn};

use crate::source::{ItemSource, LoadResult};

type Job = Box<dyn FnOnce() + Send + 'static>;

struct DeliveryInner {
    sender: UnboundedSender<Job>,
    thread_id: ThreadId,
    name: String,
}

/// Handle to the delivery thread. Cloning shares the same thread.
///
/// The thread exits once every handle is dropped and queued jobs are drained.
#[derive(Clone)]
pub struct DeliveryContext {
    inner: Arc<DeliveryInner>,
}

impl DeliveryContext {
    /// Spawns the delivery thread.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be created.
    pub fn spawn(name: impl Into<String>) -> Result<Self, std::io::Error> {
        let name = name.into();
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

        let handle = thread::Builder::new().name(name.clone()).spawn(move || {
            while let Some(job) = receiver.blocking_recv() {
                job();
            }
        })?;

        Ok(Self {
            inner: Arc::new(DeliveryInner {
                sender,
                thread_id: handle.thread().id(),
                name,
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn thread_id(&self) -> ThreadId {
        self.inner.thread_id
    }

    /// Whether the caller is already running on the delivery thread.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.inner.thread_id
    }

    /// Runs `job` on the delivery thread.
    ///
    /// Already on the delivery thread, the job runs inline instead of being
    /// queued behind the caller.
    pub fn dispatch<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_current() {
            job();
            return;
        }

        if self.inner.sender.send(Box::new(job)).is_err() {
            warn!(context = %self.inner.name, "delivery thread has stopped; job dropped");
        }
    }
}

/// Callback entry point for consumers.
///
/// Each call to [`load_items`](Self::load_items) returns immediately, runs one
/// independent fetch of the composed source on the runtime and hands the
/// result to the completion on the delivery context.
#[derive(Clone)]
pub struct ItemsLoader {
    source: Arc<dyn ItemSource>,
    runtime: Handle,
    delivery: DeliveryContext,
}

impl ItemsLoader {
    pub fn new(source: Arc<dyn ItemSource>, runtime: Handle, delivery: DeliveryContext) -> Self {
        Self {
            source,
            runtime,
            delivery,
        }
    }

    pub fn delivery(&self) -> &DeliveryContext {
        &self.delivery
    }

    pub fn load_items<F>(&self, completion: F)
    where
        F: FnOnce(LoadResult) + Send + 'static,
    {
        let source = Arc::clone(&self.source);
        let delivery = self.delivery.clone();

        self.runtime.spawn(async move {
            let result = source.load_items().await;
            debug!(
                ok = result.is_ok(),
                context = %delivery.name(),
                "load finished; delivering"
            );
            delivery.dispatch(move || completion(result));
        });
    }
}
