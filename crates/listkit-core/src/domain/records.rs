use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::source::SourceError;
use crate::{UtcDateTime, ValidationError};

/// A person the user can send money to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContact")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: non_empty("id", id.into())?,
            name: non_empty("name", name.into())?,
            phone: phone.into(),
        })
    }
}

/// A payment instrument (card) registered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstrument")]
pub struct Instrument {
    pub id: String,
    pub number: String,
    pub holder: String,
}

impl Instrument {
    pub fn new(
        id: impl Into<String>,
        number: impl Into<String>,
        holder: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: non_empty("id", id.into())?,
            number: non_empty("number", number.into())?,
            holder: holder.into(),
        })
    }
}

/// Which side of a transfer the current user was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }

    pub const fn matches(self, transfer: &Transfer) -> bool {
        match self {
            Self::Sent => transfer.is_sender,
            Self::Received => !transfer.is_sender,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A money transfer in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTransfer")]
pub struct Transfer {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub currency_code: String,
    pub date: UtcDateTime,
    pub sender: String,
    pub recipient: String,
    pub is_sender: bool,
}

impl Transfer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        currency_code: impl AsRef<str>,
        date: UtcDateTime,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        is_sender: bool,
    ) -> Result<Self, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "amount" });
        }

        Ok(Self {
            id: non_empty("id", id.into())?,
            description: description.into(),
            amount,
            currency_code: validate_currency_code(currency_code.as_ref())?,
            date,
            sender: sender.into(),
            recipient: recipient.into(),
            is_sender,
        })
    }

    pub const fn direction(&self) -> Direction {
        if self.is_sender {
            Direction::Sent
        } else {
            Direction::Received
        }
    }
}

// Wire shapes; decoding goes through the validating constructors.

#[derive(Deserialize)]
struct RawContact {
    id: String,
    name: String,
    phone: String,
}

impl TryFrom<RawContact> for Contact {
    type Error = ValidationError;

    fn try_from(raw: RawContact) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.name, raw.phone)
    }
}

#[derive(Deserialize)]
struct RawInstrument {
    id: String,
    number: String,
    holder: String,
}

impl TryFrom<RawInstrument> for Instrument {
    type Error = ValidationError;

    fn try_from(raw: RawInstrument) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.number, raw.holder)
    }
}

#[derive(Deserialize)]
struct RawTransfer {
    id: String,
    description: String,
    amount: f64,
    currency_code: String,
    date: UtcDateTime,
    sender: String,
    recipient: String,
    is_sender: bool,
}

impl TryFrom<RawTransfer> for Transfer {
    type Error = ValidationError;

    fn try_from(raw: RawTransfer) -> Result<Self, Self::Error> {
        Self::new(
            raw.id,
            raw.description,
            raw.amount,
            raw.currency_code,
            raw.date,
            raw.sender,
            raw.recipient,
            raw.is_sender,
        )
    }
}

/// Discriminant of [`DomainRecord`], used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Contact,
    Instrument,
    Transfer,
}

impl RecordKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Instrument => "instrument",
            Self::Transfer => "transfer",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed union of every record a list can display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainRecord {
    Contact(Contact),
    Instrument(Instrument),
    Transfer(Transfer),
}

impl DomainRecord {
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Contact(_) => RecordKind::Contact,
            Self::Instrument(_) => RecordKind::Instrument,
            Self::Transfer(_) => RecordKind::Transfer,
        }
    }
}

impl From<Contact> for DomainRecord {
    fn from(value: Contact) -> Self {
        Self::Contact(value)
    }
}

impl From<Instrument> for DomainRecord {
    fn from(value: Instrument) -> Self {
        Self::Instrument(value)
    }
}

impl From<Transfer> for DomainRecord {
    fn from(value: Transfer) -> Self {
        Self::Transfer(value)
    }
}

impl TryFrom<DomainRecord> for Contact {
    type Error = SourceError;

    fn try_from(value: DomainRecord) -> Result<Self, Self::Error> {
        match value {
            DomainRecord::Contact(contact) => Ok(contact),
            other => Err(SourceError::unexpected_record(
                RecordKind::Contact,
                other.kind(),
            )),
        }
    }
}

impl TryFrom<DomainRecord> for Instrument {
    type Error = SourceError;

    fn try_from(value: DomainRecord) -> Result<Self, Self::Error> {
        match value {
            DomainRecord::Instrument(instrument) => Ok(instrument),
            other => Err(SourceError::unexpected_record(
                RecordKind::Instrument,
                other.kind(),
            )),
        }
    }
}

impl TryFrom<DomainRecord> for Transfer {
    type Error = SourceError;

    fn try_from(value: DomainRecord) -> Result<Self, Self::Error> {
        match value {
            DomainRecord::Transfer(transfer) => Ok(transfer),
            other => Err(SourceError::unexpected_record(
                RecordKind::Transfer,
                other.kind(),
            )),
        }
    }
}

/// Validate and normalize currency to uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn non_empty(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(value)
}
