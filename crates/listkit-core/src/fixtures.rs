//! Canned API responses for offline (mock) mode.

use crate::http_client::{HttpResponse, StaticHttpClient};
use crate::source::Domain;

/// Base URL the mock transport answers on.
pub const MOCK_BASE_URL: &str = "https://mock.listkit.invalid";

const CONTACTS: &str = r#"[
  {"kind": "contact", "id": "c-100", "name": "Grace Hopper", "phone": "+1 202 555 0143"},
  {"kind": "contact", "id": "c-101", "name": "Linus Torvalds", "phone": "+358 40 555 0199"},
  {"kind": "contact", "id": "c-102", "name": "Margaret Hamilton", "phone": "+1 617 555 0110"}
]"#;

const INSTRUMENTS: &str = r#"[
  {"kind": "instrument", "id": "i-200", "number": "**** **** **** 4242", "holder": "Ada Lovelace"},
  {"kind": "instrument", "id": "i-201", "number": "**** **** **** 1881", "holder": "Ada Lovelace"}
]"#;

const TRANSFERS: &str = r#"[
  {"kind": "transfer", "id": "t-300", "description": "lunch", "amount": 12.5, "currency_code": "USD",
   "date": "2026-10-18T12:15:00Z", "sender": "Ada Lovelace", "recipient": "Grace Hopper", "is_sender": true},
  {"kind": "transfer", "id": "t-301", "description": "concert tickets", "amount": 84.0, "currency_code": "EUR",
   "date": "2026-10-16T19:40:00Z", "sender": "Linus Torvalds", "recipient": "Ada Lovelace", "is_sender": false},
  {"kind": "transfer", "id": "t-302", "description": "rent", "amount": 1450.0, "currency_code": "USD",
   "date": "2026-10-01T09:00:00Z", "sender": "Ada Lovelace", "recipient": "Charles Babbage", "is_sender": true},
  {"kind": "transfer", "id": "t-303", "description": "book club", "amount": 15.0, "currency_code": "GBP",
   "date": "2026-09-28T17:05:00Z", "sender": "Margaret Hamilton", "recipient": "Ada Lovelace", "is_sender": false},
  {"kind": "transfer", "id": "t-304", "description": "coffee", "amount": 4.75, "currency_code": "USD",
   "date": "2026-09-27T08:30:00Z", "sender": "Ada Lovelace", "recipient": "Linus Torvalds", "is_sender": true}
]"#;

/// Static transport serving the fixture records under `base_url`.
pub fn mock_http_client(base_url: &str) -> StaticHttpClient {
    let base_url = base_url.trim_end_matches('/');
    Domain::ALL
        .into_iter()
        .fold(StaticHttpClient::new(), |client, domain| {
            client.with_route(
                format!("{base_url}/{}", domain.as_str()),
                HttpResponse::ok_json(fixture_body(domain)),
            )
        })
}

pub const fn fixture_body(domain: Domain) -> &'static str {
    match domain {
        Domain::Contacts => CONTACTS,
        Domain::Instruments => INSTRUMENTS,
        Domain::Transfers => TRANSFERS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainRecord;

    #[test]
    fn fixtures_decode_as_records() {
        for domain in Domain::ALL {
            let records: Vec<DomainRecord> =
                serde_json::from_str(fixture_body(domain)).expect("fixture must decode");
            assert!(!records.is_empty(), "{domain} fixture is empty");
        }
    }
}
