//! # Domain Records
//!
//! Plain value types for the records a list can display.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Contact`] | Person with name and phone |
//! | [`Instrument`] | Payment card with number and holder |
//! | [`Transfer`] | Money transfer, sent or received |
//! | [`DomainRecord`] | Closed union of the three records |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Records carry no behaviour beyond validation at construction. Projection
//! into display rows lives in [`crate::item_view`].

mod records;
mod timestamp;

pub use records::{
    validate_currency_code, Contact, Direction, DomainRecord, Instrument, RecordKind, Transfer,
};
pub use timestamp::UtcDateTime;
