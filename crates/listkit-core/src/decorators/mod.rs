//! Recovery decorators over [`ItemSource`](crate::ItemSource).

mod fallback;
mod retry;

pub use fallback::{with_fallback, Fallback};
pub use retry::retry;
