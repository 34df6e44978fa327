use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::{ContactsApi, InstrumentsApi, TransfersApi};
use crate::cache::{ContactCache, PendingSaves};
use crate::format::DateStyle;
use crate::item_view::{bind_selection, Select};
use crate::source::{Domain, ItemSource, LoadFuture, Origin};
use crate::{Contact, Direction, Instrument, ItemView, Transfer};

/// Contacts fetched from the remote API.
///
/// With a cache attached, every successful fetch also stores the raw
/// contacts in the background. The save tasks are recorded in
/// [`PendingSaves`].
#[derive(Clone)]
pub struct RemoteContactsSource {
    api: Arc<dyn ContactsApi>,
    cache: Option<Arc<dyn ContactCache>>,
    saves: PendingSaves,
    select: Select<Contact>,
}

impl RemoteContactsSource {
    pub fn new(api: Arc<dyn ContactsApi>, select: Select<Contact>) -> Self {
        Self {
            api,
            cache: None,
            saves: PendingSaves::default(),
            select,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ContactCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_pending_saves(mut self, saves: PendingSaves) -> Self {
        self.saves = saves;
        self
    }
}

impl ItemSource for RemoteContactsSource {
    fn load_items<'a>(&'a self) -> LoadFuture<'a> {
        Box::pin(async move {
            let contacts = self
                .api
                .load_contacts()
                .await
                .map_err(|error| error.with_origin(Origin::Remote(Domain::Contacts)))?;
            debug!(count = contacts.len(), "remote contacts loaded");

            if let Some(cache) = &self.cache {
                if let Some(handle) = spawn_cache_save(Arc::clone(cache), contacts.clone()) {
                    self.saves.track(handle);
                }
            }

            Ok(contacts
                .iter()
                .map(|contact| ItemView::contact(contact, bind_selection(&self.select, contact)))
                .collect())
        })
    }
}

/// Payment instruments fetched from the remote API.
#[derive(Clone)]
pub struct RemoteInstrumentsSource {
    api: Arc<dyn InstrumentsApi>,
    select: Select<Instrument>,
}

impl RemoteInstrumentsSource {
    pub fn new(api: Arc<dyn InstrumentsApi>, select: Select<Instrument>) -> Self {
        Self { api, select }
    }
}

impl ItemSource for RemoteInstrumentsSource {
    fn load_items<'a>(&'a self) -> LoadFuture<'a> {
        Box::pin(async move {
            let instruments = self
                .api
                .load_instruments()
                .await
                .map_err(|error| error.with_origin(Origin::Remote(Domain::Instruments)))?;
            debug!(count = instruments.len(), "remote instruments loaded");

            Ok(instruments
                .iter()
                .map(|instrument| {
                    ItemView::instrument(instrument, bind_selection(&self.select, instrument))
                })
                .collect())
        })
    }
}

/// One direction of the remote transfer feed.
///
/// Sent transfers render long dates, received transfers short ones.
#[derive(Clone)]
pub struct RemoteTransfersSource {
    api: Arc<dyn TransfersApi>,
    direction: Direction,
    select: Select<Transfer>,
}

impl RemoteTransfersSource {
    pub fn new(api: Arc<dyn TransfersApi>, direction: Direction, select: Select<Transfer>) -> Self {
        Self {
            api,
            direction,
            select,
        }
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub const fn date_style(&self) -> DateStyle {
        match self.direction {
            Direction::Sent => DateStyle::Long,
            Direction::Received => DateStyle::Short,
        }
    }
}

impl ItemSource for RemoteTransfersSource {
    fn load_items<'a>(&'a self) -> LoadFuture<'a> {
        Box::pin(async move {
            let transfers = self
                .api
                .load_transfers()
                .await
                .map_err(|error| error.with_origin(Origin::Remote(Domain::Transfers)))?;

            let date_style = self.date_style();
            let items: Vec<ItemView> = transfers
                .iter()
                .filter(|transfer| self.direction.matches(transfer))
                .map(|transfer| {
                    ItemView::transfer(transfer, date_style, bind_selection(&self.select, transfer))
                })
                .collect();
            debug!(
                direction = %self.direction,
                fetched = transfers.len(),
                kept = items.len(),
                "remote transfers loaded"
            );

            Ok(items)
        })
    }
}

fn spawn_cache_save(cache: Arc<dyn ContactCache>, contacts: Vec<Contact>) -> Option<JoinHandle<()>> {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        warn!("no async runtime available; skipping contact cache save");
        return None;
    };

    Some(runtime.spawn(async move {
        if let Err(error) = cache.save(contacts).await {
            warn!(%error, "contact cache save failed");
        }
    }))
}
