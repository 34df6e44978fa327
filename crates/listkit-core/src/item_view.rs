//! Projection of domain records into uniform display rows.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::format::{self, DateStyle};
use crate::{Contact, DomainRecord, Instrument, Transfer};

/// Callback run when the user selects a row.
pub type OnSelect = Arc<dyn Fn() + Send + Sync>;

/// Per-record selection callback factory supplied by the screen owner.
pub type Select<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// One display row: a label, a detail line and a selection callback.
#[derive(Clone)]
pub struct ItemView {
    pub label: String,
    pub detail: String,
    on_select: OnSelect,
}

impl ItemView {
    pub fn new(label: impl Into<String>, detail: impl Into<String>, on_select: OnSelect) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
            on_select,
        }
    }

    /// Projects any record; `date_style` only affects transfers.
    pub fn project(record: &DomainRecord, date_style: DateStyle, on_select: OnSelect) -> Self {
        match record {
            DomainRecord::Contact(contact) => Self::contact(contact, on_select),
            DomainRecord::Instrument(instrument) => Self::instrument(instrument, on_select),
            DomainRecord::Transfer(transfer) => Self::transfer(transfer, date_style, on_select),
        }
    }

    pub fn contact(contact: &Contact, on_select: OnSelect) -> Self {
        Self::new(contact.name.clone(), contact.phone.clone(), on_select)
    }

    pub fn instrument(instrument: &Instrument, on_select: OnSelect) -> Self {
        Self::new(instrument.number.clone(), instrument.holder.clone(), on_select)
    }

    pub fn transfer(transfer: &Transfer, date_style: DateStyle, on_select: OnSelect) -> Self {
        let amount = format::currency(transfer.amount, &transfer.currency_code);
        let label = format!("{amount} • {}", transfer.description);
        let date = date_style.format(transfer.date);
        let detail = match date_style {
            DateStyle::Long => format!("Sent to: {} on {date}", transfer.recipient),
            DateStyle::Short => format!("Received from: {} on {date}", transfer.sender),
        };
        Self::new(label, detail, on_select)
    }

    /// Runs the selection callback.
    pub fn select(&self) {
        (self.on_select)();
    }
}

impl Debug for ItemView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemView")
            .field("label", &self.label)
            .field("detail", &self.detail)
            .finish_non_exhaustive()
    }
}

/// Binds `select` to a clone of `record`, producing a row callback.
pub(crate) fn bind_selection<T>(select: &Select<T>, record: &T) -> OnSelect
where
    T: Clone + Send + Sync + 'static,
{
    let select = Arc::clone(select);
    let record = record.clone();
    Arc::new(move || select(&record))
}
