//! Immediate retry built from nested fallbacks.

use std::sync::Arc;

use crate::decorators::Fallback;
use crate::source::ItemSource;

/// Returns a source that re-invokes `source` up to `attempts` more times
/// after a failure, with no delay between attempts.
///
/// The chain is `attempts` nested [`Fallback`]s whose secondary is always the
/// same `source` instance, so the underlying source runs at most
/// `attempts + 1` times and the first success ends the chain. Every failure
/// kind is retried alike. `attempts == 0` returns `source` itself.
pub fn retry(source: Arc<dyn ItemSource>, attempts: u32) -> Arc<dyn ItemSource> {
    (0..attempts).fold(Arc::clone(&source), |chain, _| {
        Arc::new(Fallback::new(chain, Arc::clone(&source))) as Arc<dyn ItemSource>
    })
}
