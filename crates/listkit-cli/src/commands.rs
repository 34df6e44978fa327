use std::sync::{Arc, Mutex};

use listkit_core::{
    CollaboratorsBuilder, Contact, DeliveryContext, DomainRecord, Instrument, ItemView,
    ItemsLoader, ScreenComposer, SelectionHandlers, Transfer,
};
use listkit_store::DuckDbContactCache;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::info;

use crate::cli::Cli;
use crate::error::CliError;

type SelectionSlot = Arc<Mutex<Option<DomainRecord>>>;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    pub label: String,
    pub detail: String,
}

impl From<&ItemView> for ItemRow {
    fn from(item: &ItemView) -> Self {
        Self {
            label: item.label.clone(),
            detail: item.detail.clone(),
        }
    }
}

/// Result of one screen load, ready for rendering.
#[derive(Debug, Serialize)]
pub struct Listing {
    pub screen: &'static str,
    pub count: usize,
    pub items: Vec<ItemRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<DomainRecord>,
}

struct Delivered {
    rows: Vec<ItemRow>,
    selection: Option<(usize, bool)>,
}

pub async fn run(cli: &Cli) -> Result<Listing, CliError> {
    let screen = cli.command.screen();
    let select = cli.command.args().select;
    let collaborators = collaborators(cli)?.build()?;

    let slot = SelectionSlot::default();
    let selection = SelectionHandlers::default()
        .on_contact(capture::<Contact>(&slot))
        .on_instrument(capture::<Instrument>(&slot))
        .on_transfer(capture::<Transfer>(&slot));
    let composer = ScreenComposer::new(collaborators, selection);
    let saves = composer.pending_saves();
    let source = composer.compose(screen);

    let delivery = DeliveryContext::spawn("listkit-main")?;
    let loader = ItemsLoader::new(source, Handle::current(), delivery);
    info!(%screen, mock = cli.mock, premium = cli.premium, "loading screen");

    let (sender, receiver) = oneshot::channel();
    loader.load_items(move |result| {
        let delivered = result.map(|items| Delivered {
            rows: items.iter().map(ItemRow::from).collect(),
            selection: select.map(|index| (index, items.get(index).map(ItemView::select).is_some())),
        });
        let _ = sender.send(delivered);
    });

    let delivered = receiver
        .await
        .map_err(|_| CliError::Delivery(String::from("completion was dropped")))??;
    // The process exits after rendering; let the contact cache save land first.
    saves.wait().await;

    if let Some((index, false)) = delivered.selection {
        return Err(CliError::SelectionOutOfRange {
            index,
            len: delivered.rows.len(),
        });
    }
    let selected = slot.lock().ok().and_then(|mut record| record.take());

    Ok(Listing {
        screen: screen.as_str(),
        count: delivered.rows.len(),
        items: delivered.rows,
        selected,
    })
}

/// Flags override environment values.
fn collaborators(cli: &Cli) -> Result<CollaboratorsBuilder, CliError> {
    let mut builder = CollaboratorsBuilder::new().with_env()?;
    if cli.mock {
        builder = builder.with_mock_mode();
    }
    if let Some(base_url) = &cli.base_url {
        builder = builder.with_base_url(base_url.clone());
    }
    if cli.premium {
        builder = builder.with_premium(true);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        builder = builder.with_timeout_ms(timeout_ms);
    }
    if let Some(path) = &cli.cache_db {
        builder = builder.with_cache(Arc::new(DuckDbContactCache::open(path)?));
    }
    Ok(builder)
}

fn capture<T>(slot: &SelectionSlot) -> impl Fn(&T) + Send + Sync + 'static
where
    T: Clone + Into<DomainRecord> + 'static,
{
    let slot = Arc::clone(slot);
    move |record: &T| {
        if let Ok(mut selected) = slot.lock() {
            *selected = Some(record.clone().into());
        }
    }
}
