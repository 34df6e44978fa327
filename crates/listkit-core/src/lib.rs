//! # Listkit Core
//!
//! Composable item loading for list screens.
//!
//! ## Overview
//!
//! Every list screen consumes one capability, [`ItemSource`]: load a list of
//! display-ready [`ItemView`] rows or fail with a [`SourceError`]. This crate
//! provides:
//!
//! - **Adapters** turning remote and cache collaborators into item sources
//! - **Decorators** for retry and fallback, stackable in any order
//! - **Projection** of contacts, instruments and transfers into rows
//! - **Composition** of the per-screen source graph from a static policy
//! - **Delivery** of completions on one designated thread
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Remote and cache item source adapters |
//! | [`api`] | Remote collaborator traits and the HTTP records API |
//! | [`cache`] | Contact cache trait and in-memory TTL cache |
//! | [`composition`] | Screen policies and the composer |
//! | [`config`] | Collaborator assembly from settings and environment |
//! | [`decorators`] | Retry and fallback |
//! | [`delivery`] | Delivery thread and callback loader |
//! | [`domain`] | Record types |
//! | [`error`] | Validation and configuration errors |
//! | [`fixtures`] | Offline record fixtures |
//! | [`format`] | Currency and date formatting |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`item_view`] | Display rows |
//! | [`list`] | Consumer list state with stale-result guard |
//! | [`source`] | Item source trait and load errors |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listkit_core::{CollaboratorsBuilder, Screen, ScreenComposer, SelectionHandlers};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let collaborators = CollaboratorsBuilder::new().with_mock_mode().build()?;
//!     let composer = ScreenComposer::new(collaborators, SelectionHandlers::default());
//!
//!     for item in composer.compose(Screen::SentTransfers).load_items().await? {
//!         println!("{}  {}", item.label, item.detail);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ ItemsLoader     │──── completion ───▶ DeliveryContext thread
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Fallback        │────▶│ CachedContacts   │──▶ ContactCache
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Retry (nested)  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Remote adapter  │────▶│ ContactsApi etc. │──▶ HttpClient
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod api;
pub mod cache;
pub mod composition;
pub mod config;
pub mod decorators;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod http_client;
pub mod item_view;
pub mod list;
pub mod source;

// Adapters
pub use adapters::{
    CachedContactsSource, RemoteContactsSource, RemoteInstrumentsSource, RemoteTransfersSource,
};

// Collaborators
pub use api::{ApiFuture, ContactsApi, HttpRecordsApi, InstrumentsApi, TransfersApi};
pub use cache::{ContactCache, MemoryContactCache, PendingSaves};

// Composition
pub use composition::{
    CachePolicy, Collaborators, Entitlement, Feed, LoadPolicy, Screen, ScreenComposer,
    SelectionHandlers, UserSession,
};
pub use config::CollaboratorsBuilder;

// Decorators
pub use decorators::{retry, with_fallback, Fallback};

// Delivery
pub use delivery::{DeliveryContext, ItemsLoader};

// Domain models
pub use domain::{
    validate_currency_code, Contact, Direction, DomainRecord, Instrument, RecordKind, Transfer,
    UtcDateTime,
};

// Error types
pub use error::{ConfigError, CoreError, ValidationError};

// Formatting
pub use format::DateStyle;

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, ReqwestHttpClient,
    StaticHttpClient,
};

// Display rows
pub use item_view::{ItemView, OnSelect, Select};
pub use list::{Applied, ItemList, ListState, LoadTicket};

// Item source
pub use source::{
    Domain, ItemSource, ItemSourceExt, LoadFuture, LoadResult, Origin, SourceError,
    SourceErrorKind,
};
