//! Behavior-driven tests for the persistent contact cache
//!
//! A premium user's contacts must survive a restart and answer when the
//! remote is down.

use std::sync::Arc;

use listkit_core::fixtures::{mock_http_client, MOCK_BASE_URL};
use listkit_core::{
    ApiFuture, Collaborators, Contact, ContactCache, ContactsApi, HttpRecordsApi, Origin, Screen,
    ScreenComposer, SelectionHandlers, SourceError, SourceErrorKind, StaticHttpClient,
    UserSession,
};
use listkit_store::DuckDbContactCache;
use tempfile::tempdir;

fn contacts() -> Vec<Contact> {
    vec![
        Contact::new("c-1", "Grace Hopper", "555-0100").expect("valid contact"),
        Contact::new("c-2", "Linus Torvalds", "555-0101").expect("valid contact"),
        Contact::new("c-3", "Margaret Hamilton", "555-0102").expect("valid contact"),
    ]
}

struct DownContacts;

impl ContactsApi for DownContacts {
    fn load_contacts<'a>(&'a self) -> ApiFuture<'a, Vec<Contact>> {
        Box::pin(async move { Err(SourceError::transport("service unavailable")) })
    }
}

fn offline_collaborators(cache: Arc<DuckDbContactCache>, premium: bool) -> Collaborators {
    let unused = Arc::new(HttpRecordsApi::new(
        Arc::new(StaticHttpClient::new()),
        "https://unused.invalid",
    ));
    Collaborators {
        contacts: Arc::new(DownContacts),
        instruments: unused.clone(),
        transfers: unused,
        cache,
        entitlement: Arc::new(UserSession::new(premium)),
    }
}

#[tokio::test]
async fn empty_store_is_a_cache_miss() {
    // Given: A freshly created database
    let dir = tempdir().expect("temp dir");
    let cache = DuckDbContactCache::open(dir.path().join("cache.duckdb")).expect("open store");

    // When: Contacts are loaded
    let error = cache.load().await.expect_err("nothing saved yet");

    // Then: The load reports a cache miss
    assert_eq!(error.kind(), SourceErrorKind::CacheMiss);
}

#[tokio::test]
async fn saved_contacts_survive_reopening_the_database() {
    // Given: Contacts saved to a database file
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("cache.duckdb");
    {
        let cache = DuckDbContactCache::open(&path).expect("open store");
        cache.save(contacts()).await.expect("save contacts");
    }

    // When: The database is opened again
    let reopened = DuckDbContactCache::open(&path).expect("reopen store");
    let loaded = reopened.load().await.expect("load contacts");

    // Then: The same contacts come back in saved order
    assert_eq!(loaded, contacts());
    assert_eq!(reopened.path(), Some(path.as_path()));
}

#[tokio::test]
async fn a_new_save_replaces_the_previous_set() {
    let cache = DuckDbContactCache::open_in_memory().expect("in-memory store");

    cache.save(contacts()).await.expect("first save");
    cache
        .save(vec![Contact::new("c-9", "Ada Lovelace", "555-0199").expect("valid contact")])
        .await
        .expect("second save");

    let loaded = cache.load().await.expect("load contacts");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "Ada Lovelace");
}

#[tokio::test]
async fn premium_contacts_screen_falls_back_to_the_persistent_store() {
    // Given: A premium user whose contacts were cached in an earlier session
    let dir = tempdir().expect("temp dir");
    let cache = Arc::new(DuckDbContactCache::open(dir.path().join("cache.duckdb")).expect("open"));
    cache.save(contacts()).await.expect("seed store");

    // When: The remote is down and the contacts screen loads
    let screen = ScreenComposer::new(
        offline_collaborators(cache, true),
        SelectionHandlers::default(),
    )
    .compose(Screen::Contacts);
    let items = screen.load_items().await.expect("store answers");

    // Then: The cached contacts are shown in order
    let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["Grace Hopper", "Linus Torvalds", "Margaret Hamilton"]);
}

#[tokio::test]
async fn premium_screen_reports_the_cache_error_when_the_store_is_empty() {
    let cache = Arc::new(DuckDbContactCache::open_in_memory().expect("in-memory store"));
    let screen = ScreenComposer::new(
        offline_collaborators(cache, true),
        SelectionHandlers::default(),
    )
    .compose(Screen::Contacts);

    let error = screen.load_items().await.expect_err("remote down, store empty");

    assert_eq!(error.kind(), SourceErrorKind::CacheMiss);
    assert_eq!(error.origin(), Some(Origin::Cache));
}

#[tokio::test]
async fn contacts_fetched_now_answer_the_next_offline_run() {
    // Given: A premium user online, with a DuckDB-backed contact cache
    let dir = tempdir().expect("temp dir");
    let cache = Arc::new(DuckDbContactCache::open(dir.path().join("cache.duckdb")).expect("open"));
    let online = Arc::new(HttpRecordsApi::new(
        Arc::new(mock_http_client(MOCK_BASE_URL)),
        MOCK_BASE_URL,
    ));
    let composer = ScreenComposer::new(
        Collaborators {
            contacts: online.clone(),
            instruments: online.clone(),
            transfers: online,
            cache: cache.clone(),
            entitlement: Arc::new(UserSession::new(true)),
        },
        SelectionHandlers::default(),
    );

    // When: The contacts screen loads and its background save is awaited
    let fetched = composer
        .compose(Screen::Contacts)
        .load_items()
        .await
        .expect("remote contacts");
    let saves = composer.pending_saves();
    saves.wait().await;

    // Then: The store holds them and a later offline run is served from it
    assert_eq!(saves.in_flight(), 0);
    assert_eq!(cache.load().await.expect("saved contacts").len(), fetched.len());

    let offline = ScreenComposer::new(
        offline_collaborators(cache, true),
        SelectionHandlers::default(),
    )
    .compose(Screen::Contacts);
    let labels: Vec<String> = offline
        .load_items()
        .await
        .expect("store answers")
        .into_iter()
        .map(|item| item.label)
        .collect();
    assert_eq!(labels, vec!["Grace Hopper", "Linus Torvalds", "Margaret Hamilton"]);
}
