use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Transfer date, kept in UTC and exchanged as RFC3339 with a `Z` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    /// Rejects anything that is not RFC3339 at offset zero.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match OffsetDateTime::parse(input, &Rfc3339) {
            Ok(value) if value.offset() == UtcOffset::UTC => Ok(Self(value)),
            _ => Err(ValidationError::TimestampNotUtc {
                value: input.to_owned(),
            }),
        }
    }

    pub const fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = self.0.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DomainRecord, Transfer};

    #[test]
    fn transfer_date_survives_a_json_round_trip() {
        let body = r#"{"kind":"transfer","id":"t-300","description":"lunch","amount":12.5,
            "currency_code":"USD","date":"2026-10-18T12:15:00Z","sender":"Ada Lovelace",
            "recipient":"Grace Hopper","is_sender":true}"#;
        let record: DomainRecord = serde_json::from_str(body).expect("fixture transfer");
        let transfer = Transfer::try_from(record.clone()).expect("transfer record");

        assert_eq!(transfer.date.into_inner().hour(), 12);
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["date"], "2026-10-18T12:15:00Z");
    }

    #[test]
    fn offset_dates_are_not_transfer_dates() {
        let err = UtcDateTime::parse("2026-10-18T14:15:00+02:00").expect_err("must fail");
        assert!(matches!(err, ValidationError::TimestampNotUtc { .. }));
        assert!(UtcDateTime::parse("18/10/2026").is_err());
    }
}
