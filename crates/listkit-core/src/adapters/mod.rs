//! Item source adapters over remote and cache collaborators.
//!
//! | Adapter | Collaborator | Notes |
//! |---------|--------------|-------|
//! | [`RemoteContactsSource`] | [`ContactsApi`](crate::api::ContactsApi) | optional background cache save |
//! | [`RemoteInstrumentsSource`] | [`InstrumentsApi`](crate::api::InstrumentsApi) | |
//! | [`RemoteTransfersSource`] | [`TransfersApi`](crate::api::TransfersApi) | direction filter, per-direction date style |
//! | [`CachedContactsSource`] | [`ContactCache`](crate::cache::ContactCache) | read only |
//!
//! Adapters tag collaborator errors with their origin and otherwise return
//! them unchanged. None of them retries.

mod cache;
mod remote;

pub use cache::CachedContactsSource;
pub use remote::{RemoteContactsSource, RemoteInstrumentsSource, RemoteTransfersSource};
