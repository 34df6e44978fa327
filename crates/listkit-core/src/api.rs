//! Remote API collaborator contracts and the HTTP-backed implementation.
//!
//! | Trait | Endpoint | Records |
//! |-------|----------|---------|
//! | [`ContactsApi`] | `GET {base}/contacts` | [`Contact`] |
//! | [`InstrumentsApi`] | `GET {base}/instruments` | [`Instrument`] |
//! | [`TransfersApi`] | `GET {base}/transfers` | [`Transfer`], both directions |
//!
//! Each endpoint answers a JSON array of `kind`-tagged [`DomainRecord`]s.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::source::{Domain, SourceError};
use crate::{Contact, DomainRecord, Instrument, Transfer};

/// Boxed future returned by collaborator calls.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

pub trait ContactsApi: Send + Sync {
    fn load_contacts<'a>(&'a self) -> ApiFuture<'a, Vec<Contact>>;
}

pub trait InstrumentsApi: Send + Sync {
    fn load_instruments<'a>(&'a self) -> ApiFuture<'a, Vec<Instrument>>;
}

/// Transfers arrive undifferentiated; direction filtering is the adapter's job.
pub trait TransfersApi: Send + Sync {
    fn load_transfers<'a>(&'a self) -> ApiFuture<'a, Vec<Transfer>>;
}

/// JSON-over-HTTP records API.
#[derive(Clone)]
pub struct HttpRecordsApi {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    auth: HttpAuth,
    timeout_ms: u64,
}

impl HttpRecordsApi {
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            auth: HttpAuth::None,
            timeout_ms: 3_000,
        }
    }

    pub fn with_auth(mut self, auth: HttpAuth) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn endpoint(&self, domain: Domain) -> String {
        format!("{}/{}", self.base_url, domain.as_str())
    }

    async fn fetch_records(&self, domain: Domain) -> Result<Vec<DomainRecord>, SourceError> {
        let request = HttpRequest::get(self.endpoint(domain))
            .with_header("accept", "application/json")
            .with_auth(&self.auth)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::transport(format!("{domain} transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::transport(format!(
                "{domain} endpoint returned status {}",
                response.status
            )));
        }

        let records: Vec<DomainRecord> = serde_json::from_str(&response.body).map_err(|error| {
            SourceError::transport(format!("{domain} response could not be decoded: {error}"))
        })?;

        debug!(%domain, count = records.len(), "fetched records");
        Ok(records)
    }

    async fn fetch_typed<T>(&self, domain: Domain) -> Result<Vec<T>, SourceError>
    where
        T: TryFrom<DomainRecord, Error = SourceError>,
    {
        self.fetch_records(domain)
            .await?
            .into_iter()
            .map(T::try_from)
            .collect()
    }
}

impl ContactsApi for HttpRecordsApi {
    fn load_contacts<'a>(&'a self) -> ApiFuture<'a, Vec<Contact>> {
        Box::pin(self.fetch_typed(Domain::Contacts))
    }
}

impl InstrumentsApi for HttpRecordsApi {
    fn load_instruments<'a>(&'a self) -> ApiFuture<'a, Vec<Instrument>> {
        Box::pin(self.fetch_typed(Domain::Instruments))
    }
}

impl TransfersApi for HttpRecordsApi {
    fn load_transfers<'a>(&'a self) -> ApiFuture<'a, Vec<Transfer>> {
        Box::pin(self.fetch_typed(Domain::Transfers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpResponse, StaticHttpClient};

    #[test]
    fn endpoint_trims_trailing_slash() {
        let api = HttpRecordsApi::new(Arc::new(StaticHttpClient::new()), "https://api.test/v1/");

        assert_eq!(api.endpoint(Domain::Transfers), "https://api.test/v1/transfers");
    }

    #[tokio::test]
    async fn decodes_tagged_contacts() {
        let body = r#"[{"kind":"contact","id":"c-1","name":"Grace","phone":"555-0100"}]"#;
        let client = StaticHttpClient::new()
            .with_route("https://api.test/contacts", HttpResponse::ok_json(body));
        let api = HttpRecordsApi::new(Arc::new(client), "https://api.test");

        let contacts = api.load_contacts().await.expect("contacts decode");

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Grace");
    }
}
