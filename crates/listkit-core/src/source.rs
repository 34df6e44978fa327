//! Item source trait and the error taxonomy of the load path.
//!
//! This module defines the capability every adapter and decorator
//! implements (`ItemSource`), the result it produces (`LoadResult`), and the
//! structured error carried by failed loads.
//!
//! # Error kinds
//!
//! | Kind | Code | Raised by |
//! |------|------|-----------|
//! | [`SourceErrorKind::Transport`] | `source.transport` | Remote API collaborators |
//! | [`SourceErrorKind::CacheMiss`] | `source.cache_miss` | Cache collaborators |
//! | [`SourceErrorKind::UnexpectedRecord`] | `source.unexpected_record` | Typed record boundaries |
//!
//! # Example
//!
//! ```rust,ignore
//! use listkit_core::{ItemSource, ItemSourceExt};
//!
//! async fn show(source: std::sync::Arc<dyn ItemSource>) {
//!     match source.retry(2).load_items().await {
//!         Ok(items) => items.iter().for_each(|item| println!("{}", item.label)),
//!         Err(error) => eprintln!("{error}"),
//!     }
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::decorators::{retry, Fallback};
use crate::{ItemView, RecordKind};

/// Remote record family an API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Contacts,
    Instruments,
    Transfers,
}

impl Domain {
    pub const ALL: [Self; 3] = [Self::Contacts, Self::Instruments, Self::Transfers];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Instruments => "instruments",
            Self::Transfers => "transfers",
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a load error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Remote(Domain),
    Cache,
}

impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(domain) => write!(f, "remote:{domain}"),
            Self::Cache => f.write_str("cache"),
        }
    }
}

/// Load error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Transport,
    CacheMiss,
    UnexpectedRecord,
}

/// Structured error surfaced by item sources.
///
/// Adapters tag errors with their [`Origin`] and otherwise pass collaborator
/// errors through unchanged; decorators never rewrite them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    origin: Option<Origin>,
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            origin: None,
        }
    }

    pub fn cache_miss(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::CacheMiss,
            message: message.into(),
            origin: None,
        }
    }

    pub fn unexpected_record(expected: RecordKind, found: RecordKind) -> Self {
        Self {
            kind: SourceErrorKind::UnexpectedRecord,
            message: format!("expected {expected} record, found {found}"),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn origin(&self) -> Option<Origin> {
        self.origin
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::CacheMiss => "source.cache_miss",
            SourceErrorKind::UnexpectedRecord => "source.unexpected_record",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.origin {
            Some(origin) => write!(f, "{} ({}, {origin})", self.message, self.code()),
            None => write!(f, "{} ({})", self.message, self.code()),
        }
    }
}

impl std::error::Error for SourceError {}

/// Outcome of one load: the ordered items, or the terminal error.
pub type LoadResult = Result<Vec<ItemView>, SourceError>;

/// Boxed future returned by [`ItemSource::load_items`].
pub type LoadFuture<'a> = Pin<Box<dyn Future<Output = LoadResult> + Send + 'a>>;

/// Capability to asynchronously produce a list of display-ready items.
///
/// Adapters implement it over remote and cache collaborators; decorators
/// implement it by wrapping other sources. Each call is an independent fetch.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; composed graphs are shared through
/// `Arc<dyn ItemSource>` and driven from runtime worker threads.
pub trait ItemSource: Send + Sync {
    /// Fetches and projects the items.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the underlying collaborator fails and no
    /// decorator recovered from it.
    fn load_items<'a>(&'a self) -> LoadFuture<'a>;
}

/// Combinators for stacking decorators onto a shared source.
pub trait ItemSourceExt {
    /// Re-invokes the source up to `attempts` more times after a failure.
    fn retry(self, attempts: u32) -> Arc<dyn ItemSource>;

    /// Falls back to `secondary` when this source fails.
    fn fallback(self, secondary: Arc<dyn ItemSource>) -> Arc<dyn ItemSource>;
}

impl ItemSourceExt for Arc<dyn ItemSource> {
    fn retry(self, attempts: u32) -> Arc<dyn ItemSource> {
        retry(self, attempts)
    }

    fn fallback(self, secondary: Arc<dyn ItemSource>) -> Arc<dyn ItemSource> {
        Arc::new(Fallback::new(self, secondary))
    }
}
