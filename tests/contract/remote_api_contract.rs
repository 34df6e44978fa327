//! Contract tests for the HTTP records API
//!
//! Every remote failure mode must reach the load path as a structured
//! [`SourceError`] with the right kind.

use std::sync::Arc;

use listkit_core::fixtures::{mock_http_client, MOCK_BASE_URL};
use listkit_core::{
    ContactsApi, Domain, HttpClient, HttpError, HttpFuture, HttpRecordsApi, HttpRequest,
    HttpResponse, InstrumentsApi, SourceErrorKind, StaticHttpClient, TransfersApi,
};

const BASE_URL: &str = "https://api.contract.test/v1";

fn api_with(route: &str, response: HttpResponse) -> HttpRecordsApi {
    let client = StaticHttpClient::new().with_route(format!("{BASE_URL}/{route}"), response);
    HttpRecordsApi::new(Arc::new(client), BASE_URL)
}

/// Transport that fails before any response is received.
struct Unreachable;

impl HttpClient for Unreachable {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        Box::pin(async move { Err(HttpError::new(format!("connect to {} refused", request.url))) })
    }
}

#[tokio::test]
async fn contract_unknown_endpoint_is_a_transport_error() {
    let api = HttpRecordsApi::new(Arc::new(StaticHttpClient::new()), BASE_URL);

    let error = api.load_contacts().await.expect_err("404");

    assert_eq!(error.kind(), SourceErrorKind::Transport);
    assert!(error.message().contains("404"), "{error}");
}

#[tokio::test]
async fn contract_connection_failure_is_a_transport_error() {
    let api = HttpRecordsApi::new(Arc::new(Unreachable), BASE_URL);

    let error = api.load_instruments().await.expect_err("unreachable");

    assert_eq!(error.kind(), SourceErrorKind::Transport);
    assert!(error.message().contains("refused"), "{error}");
}

#[tokio::test]
async fn contract_malformed_body_is_a_transport_error() {
    let api = api_with("transfers", HttpResponse::ok_json("{not json"));

    let error = api.load_transfers().await.expect_err("undecodable");

    assert_eq!(error.kind(), SourceErrorKind::Transport);
    assert_eq!(error.code(), "source.transport");
}

#[tokio::test]
async fn contract_invalid_transfer_is_rejected_at_decode() {
    let body = r#"[{"kind":"transfer","id":"","description":"rent","amount":1e20,
        "currency_code":"not-a-code","date":"2026-10-01T09:00:00Z",
        "sender":"Ada","recipient":"Charles","is_sender":true}]"#;
    let api = api_with("transfers", HttpResponse::ok_json(body));

    let error = api.load_transfers().await.expect_err("empty id, bad currency");

    assert_eq!(error.kind(), SourceErrorKind::Transport);
    assert!(error.message().contains("could not be decoded"), "{error}");
}

#[tokio::test]
async fn contract_contact_without_id_never_reaches_the_cache() {
    let body = r#"[{"kind":"contact","id":"c-1","name":"Grace","phone":"555-0100"},
        {"kind":"contact","id":"  ","name":"Nobody","phone":""}]"#;
    let api = api_with("contacts", HttpResponse::ok_json(body));

    let error = api.load_contacts().await.expect_err("second contact has a blank id");

    assert_eq!(error.kind(), SourceErrorKind::Transport);
    assert!(error.message().contains("'id' cannot be empty"), "{error}");
}

#[tokio::test]
async fn contract_wrong_record_kind_is_an_unexpected_record() {
    let body = r#"[{"kind":"instrument","id":"i-1","number":"**** 4242","holder":"Ada"}]"#;
    let api = api_with("contacts", HttpResponse::ok_json(body));

    let error = api.load_contacts().await.expect_err("instrument in contacts feed");

    assert_eq!(error.kind(), SourceErrorKind::UnexpectedRecord);
    assert_eq!(error.message(), "expected contact record, found instrument");
}

#[tokio::test]
async fn contract_empty_feed_is_a_successful_empty_list() {
    let api = api_with("instruments", HttpResponse::ok_json("[]"));

    let instruments = api.load_instruments().await.expect("empty feed");

    assert!(instruments.is_empty());
}

#[tokio::test]
async fn contract_mock_fixtures_cover_every_endpoint() {
    let api = HttpRecordsApi::new(Arc::new(mock_http_client(MOCK_BASE_URL)), MOCK_BASE_URL);

    let contacts = api.load_contacts().await.expect("contacts fixture");
    let instruments = api.load_instruments().await.expect("instruments fixture");
    let transfers = api.load_transfers().await.expect("transfers fixture");

    assert_eq!(contacts.len(), 3);
    assert_eq!(instruments.len(), 2);
    assert_eq!(transfers.iter().filter(|transfer| transfer.is_sender).count(), 3);
    assert_eq!(transfers.iter().filter(|transfer| !transfer.is_sender).count(), 2);
    assert_eq!(api.endpoint(Domain::Contacts), format!("{MOCK_BASE_URL}/contacts"));
}
