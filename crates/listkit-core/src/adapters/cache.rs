use std::sync::Arc;

use tracing::debug;

use crate::cache::ContactCache;
use crate::item_view::{bind_selection, Select};
use crate::source::{ItemSource, LoadFuture, Origin};
use crate::{Contact, ItemView};

/// Contacts read back from the local cache. Never writes.
#[derive(Clone)]
pub struct CachedContactsSource {
    cache: Arc<dyn ContactCache>,
    select: Select<Contact>,
}

impl CachedContactsSource {
    pub fn new(cache: Arc<dyn ContactCache>, select: Select<Contact>) -> Self {
        Self { cache, select }
    }
}

impl ItemSource for CachedContactsSource {
    fn load_items<'a>(&'a self) -> LoadFuture<'a> {
        Box::pin(async move {
            let contacts = self
                .cache
                .load()
                .await
                .map_err(|error| error.with_origin(Origin::Cache))?;
            debug!(count = contacts.len(), "cached contacts loaded");

            Ok(contacts
                .iter()
                .map(|contact| ItemView::contact(contact, bind_selection(&self.select, contact)))
                .collect())
        })
    }
}
