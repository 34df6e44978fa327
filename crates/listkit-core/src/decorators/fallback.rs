use std::sync::Arc;

use tracing::debug;

use crate::source::{ItemSource, LoadFuture};

/// Two-tier recovery: primary first, secondary only after primary fails.
///
/// The primary's error is dropped when the secondary runs; the caller sees
/// the secondary's result, success or failure. The two sources never run
/// concurrently.
#[derive(Clone)]
pub struct Fallback {
    primary: Arc<dyn ItemSource>,
    secondary: Arc<dyn ItemSource>,
}

impl Fallback {
    pub fn new(primary: Arc<dyn ItemSource>, secondary: Arc<dyn ItemSource>) -> Self {
        Self { primary, secondary }
    }
}

impl ItemSource for Fallback {
    fn load_items<'a>(&'a self) -> LoadFuture<'a> {
        Box::pin(async move {
            match self.primary.load_items().await {
                Ok(items) => Ok(items),
                Err(error) => {
                    debug!(%error, "primary source failed; invoking fallback");
                    self.secondary.load_items().await
                }
            }
        })
    }
}

/// Wraps `primary` so that `secondary` answers when it fails.
pub fn with_fallback(
    primary: Arc<dyn ItemSource>,
    secondary: Arc<dyn ItemSource>,
) -> Arc<dyn ItemSource> {
    Arc::new(Fallback::new(primary, secondary))
}
