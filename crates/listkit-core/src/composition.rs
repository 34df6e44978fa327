//! Per-screen composition of item sources.
//!
//! Which adapters and decorators a screen stacks is data
//! ([`Screen::policy`]); [`ScreenComposer`] turns that data into an
//! `Arc<dyn ItemSource>` using injected collaborators. Nothing downstream of
//! the composer knows which screen it serves.
//!
//! | Screen | Feed | Retries | Cache |
//! |--------|------|---------|-------|
//! | `contacts` | contacts | 2 | save + fallback when entitled |
//! | `instruments` | instruments | 0 | never |
//! | `sent` | transfers, sent only | 1 | never |
//! | `received` | transfers, received only | 1 | never |

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::adapters::{
    CachedContactsSource, RemoteContactsSource, RemoteInstrumentsSource, RemoteTransfersSource,
};
use crate::api::{ContactsApi, InstrumentsApi, TransfersApi};
use crate::cache::{ContactCache, PendingSaves};
use crate::item_view::Select;
use crate::source::{ItemSource, ItemSourceExt};
use crate::{Contact, Direction, Instrument, Transfer, ValidationError};

/// Screens that display a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Contacts,
    Instruments,
    SentTransfers,
    ReceivedTransfers,
}

impl Screen {
    pub const ALL: [Self; 4] = [
        Self::Contacts,
        Self::Instruments,
        Self::SentTransfers,
        Self::ReceivedTransfers,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Instruments => "instruments",
            Self::SentTransfers => "sent",
            Self::ReceivedTransfers => "received",
        }
    }

    pub const fn policy(self) -> LoadPolicy {
        match self {
            Self::Contacts => LoadPolicy {
                feed: Feed::Contacts,
                retries: 2,
                cache: CachePolicy::WhenEntitled,
            },
            Self::Instruments => LoadPolicy {
                feed: Feed::Instruments,
                retries: 0,
                cache: CachePolicy::Never,
            },
            Self::SentTransfers => LoadPolicy {
                feed: Feed::Transfers(Direction::Sent),
                retries: 1,
                cache: CachePolicy::Never,
            },
            Self::ReceivedTransfers => LoadPolicy {
                feed: Feed::Transfers(Direction::Received),
                retries: 1,
                cache: CachePolicy::Never,
            },
        }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "contacts" => Ok(Self::Contacts),
            "instruments" => Ok(Self::Instruments),
            "sent" => Ok(Self::SentTransfers),
            "received" => Ok(Self::ReceivedTransfers),
            other => Err(ValidationError::InvalidScreen {
                value: other.to_owned(),
            }),
        }
    }
}

/// Remote feed a screen reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Contacts,
    Instruments,
    Transfers(Direction),
}

/// Cache participation of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    Never,
    /// Save successful fetches and fall back to the cache, for entitled users only.
    WhenEntitled,
}

/// Static load configuration of one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadPolicy {
    pub feed: Feed,
    pub retries: u32,
    pub cache: CachePolicy,
}

/// Capability check deciding whether the user gets cached contacts.
pub trait Entitlement: Send + Sync {
    fn caching_enabled(&self) -> bool;
}

/// The signed-in user as far as loading is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserSession {
    pub is_premium: bool,
}

impl UserSession {
    pub const fn new(is_premium: bool) -> Self {
        Self { is_premium }
    }
}

impl Entitlement for UserSession {
    fn caching_enabled(&self) -> bool {
        self.is_premium
    }
}

/// Row selection callbacks, one per record type. Defaults do nothing.
#[derive(Clone)]
pub struct SelectionHandlers {
    pub contact: Select<Contact>,
    pub instrument: Select<Instrument>,
    pub transfer: Select<Transfer>,
}

impl Default for SelectionHandlers {
    fn default() -> Self {
        Self {
            contact: Arc::new(|_: &Contact| {}),
            instrument: Arc::new(|_: &Instrument| {}),
            transfer: Arc::new(|_: &Transfer| {}),
        }
    }
}

impl SelectionHandlers {
    pub fn on_contact(mut self, select: impl Fn(&Contact) + Send + Sync + 'static) -> Self {
        self.contact = Arc::new(select);
        self
    }

    pub fn on_instrument(mut self, select: impl Fn(&Instrument) + Send + Sync + 'static) -> Self {
        self.instrument = Arc::new(select);
        self
    }

    pub fn on_transfer(mut self, select: impl Fn(&Transfer) + Send + Sync + 'static) -> Self {
        self.transfer = Arc::new(select);
        self
    }
}

/// External collaborators injected at composition time.
#[derive(Clone)]
pub struct Collaborators {
    pub contacts: Arc<dyn ContactsApi>,
    pub instruments: Arc<dyn InstrumentsApi>,
    pub transfers: Arc<dyn TransfersApi>,
    pub cache: Arc<dyn ContactCache>,
    pub entitlement: Arc<dyn Entitlement>,
}

/// Builds the terminal item source of each screen.
#[derive(Clone)]
pub struct ScreenComposer {
    collaborators: Collaborators,
    selection: SelectionHandlers,
    saves: PendingSaves,
}

impl ScreenComposer {
    pub fn new(collaborators: Collaborators, selection: SelectionHandlers) -> Self {
        Self {
            collaborators,
            selection,
            saves: PendingSaves::default(),
        }
    }

    /// Cache saves started by every source this composer builds.
    pub fn pending_saves(&self) -> PendingSaves {
        self.saves.clone()
    }

    pub fn compose(&self, screen: Screen) -> Arc<dyn ItemSource> {
        self.compose_policy(screen.policy())
    }

    /// Builds the source graph for an arbitrary policy.
    pub fn compose_policy(&self, policy: LoadPolicy) -> Arc<dyn ItemSource> {
        let cached = match policy.cache {
            CachePolicy::Never => false,
            CachePolicy::WhenEntitled => self.collaborators.entitlement.caching_enabled(),
        };
        debug!(?policy, cached, "composing item source");

        let remote = self.remote_source(policy.feed, cached);
        let retried = remote.retry(policy.retries);

        match (policy.feed, cached) {
            (Feed::Contacts, true) => retried.fallback(Arc::new(CachedContactsSource::new(
                Arc::clone(&self.collaborators.cache),
                Arc::clone(&self.selection.contact),
            ))),
            _ => retried,
        }
    }

    fn remote_source(&self, feed: Feed, cached: bool) -> Arc<dyn ItemSource> {
        match feed {
            Feed::Contacts => {
                let source = RemoteContactsSource::new(
                    Arc::clone(&self.collaborators.contacts),
                    Arc::clone(&self.selection.contact),
                );
                if cached {
                    Arc::new(
                        source
                            .with_cache(Arc::clone(&self.collaborators.cache))
                            .with_pending_saves(self.saves.clone()),
                    )
                } else {
                    Arc::new(source)
                }
            }
            Feed::Instruments => Arc::new(RemoteInstrumentsSource::new(
                Arc::clone(&self.collaborators.instruments),
                Arc::clone(&self.selection.instrument),
            )),
            Feed::Transfers(direction) => Arc::new(RemoteTransfersSource::new(
                Arc::clone(&self.collaborators.transfers),
                direction,
                Arc::clone(&self.selection.transfer),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_table_matches_screens() {
        assert_eq!(Screen::Contacts.policy().retries, 2);
        assert_eq!(Screen::Contacts.policy().cache, CachePolicy::WhenEntitled);
        assert_eq!(Screen::Instruments.policy().retries, 0);
        assert_eq!(Screen::Instruments.policy().cache, CachePolicy::Never);
        assert_eq!(
            Screen::SentTransfers.policy().feed,
            Feed::Transfers(Direction::Sent)
        );
        assert_eq!(
            Screen::ReceivedTransfers.policy().feed,
            Feed::Transfers(Direction::Received)
        );
        assert_eq!(Screen::ReceivedTransfers.policy().retries, 1);
    }

    #[test]
    fn screen_names_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(screen.as_str().parse::<Screen>(), Ok(screen));
        }
        assert!(matches!(
            "friends".parse::<Screen>(),
            Err(ValidationError::InvalidScreen { .. })
        ));
    }

    #[test]
    fn session_entitlement_follows_premium_flag() {
        assert!(UserSession::new(true).caching_enabled());
        assert!(!UserSession::default().caching_enabled());
    }
}
