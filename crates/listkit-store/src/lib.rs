//! # Listkit Store
//!
//! Persistent contact cache on DuckDB.
//!
//! [`DuckDbContactCache`] implements [`ContactCache`] over a single table:
//!
//! ```text
//! cached_contacts(position, id, name, phone, saved_at)
//! ```
//!
//! A save replaces the whole set inside one transaction, so readers never
//! observe a mix of two saves. Loads return rows ordered by `position`, which
//! preserves the remote order. DuckDB calls are blocking and run on
//! `tokio::task::spawn_blocking`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ::duckdb::{Connection, ToSql};
use listkit_core::{ApiFuture, Contact, ContactCache, SourceError};
use thiserror::Error;
use tracing::debug;

const MIGRATION: &str = "CREATE TABLE IF NOT EXISTS cached_contacts (
    position BIGINT NOT NULL,
    id VARCHAR NOT NULL,
    name VARCHAR NOT NULL,
    phone VARCHAR NOT NULL,
    saved_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);";

/// Errors raised by the contact store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `DuckDB` database error.
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    /// I/O error creating the database directory.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A stored row no longer forms a valid contact.
    #[error("invalid cached contact at position {position}: {reason}")]
    InvalidRow { position: i64, reason: String },

    /// Another thread panicked while holding the connection.
    #[error("contact store connection lock poisoned")]
    Poisoned,

    /// The blocking task running the query did not complete.
    #[error("contact store task failed: {0}")]
    Task(String),
}

/// Contact cache persisted in a DuckDB database.
#[derive(Clone)]
pub struct DuckDbContactCache {
    connection: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for DuckDbContactCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuckDbContactCache")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl DuckDbContactCache {
    /// Opens (or creates) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the parent directory cannot be created or
    /// the database cannot be opened and migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let connection = Connection::open(path)?;
        Self::initialize(connection, Some(path.to_path_buf()))
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the database cannot be created.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::initialize(Connection::open_in_memory()?, None)
    }

    fn initialize(connection: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        connection.execute_batch(MIGRATION)?;
        debug!(path = ?path, "contact store ready");
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            path,
        })
    }

    /// Database file backing this cache; `None` when in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replaces the stored contacts with `contacts`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database failure; the previous set is kept.
    pub fn replace_contacts(&self, contacts: &[Contact]) -> Result<(), StoreError> {
        let connection = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<(), StoreError> {
            connection.execute_batch("DELETE FROM cached_contacts")?;
            for (index, contact) in contacts.iter().enumerate() {
                let position = i64::try_from(index).unwrap_or(i64::MAX);
                let params: [&dyn ToSql; 4] =
                    [&position, &contact.id, &contact.name, &contact.phone];
                connection.execute(
                    "INSERT INTO cached_contacts (position, id, name, phone, saved_at) \
                     VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)",
                    params.as_slice(),
                )?;
            }
            Ok(())
        })();

        finalize_transaction(&connection, result)?;
        debug!(count = contacts.len(), "contacts stored");
        Ok(())
    }

    /// Reads the stored contacts in saved order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database failure or an invalid stored row.
    pub fn read_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        let connection = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        let mut statement = connection
            .prepare("SELECT position, id, name, phone FROM cached_contacts ORDER BY position")?;
        let rows = statement.query_map([] as [&dyn ToSql; 0], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut contacts = Vec::new();
        for row in rows {
            let (position, id, name, phone) = row?;
            let contact = Contact::new(id, name, phone).map_err(|error| StoreError::InvalidRow {
                position,
                reason: error.to_string(),
            })?;
            contacts.push(contact);
        }
        Ok(contacts)
    }

    async fn run_blocking<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || operation(&store))
            .await
            .map_err(|error| StoreError::Task(error.to_string()))?
    }
}

impl ContactCache for DuckDbContactCache {
    fn save<'a>(&'a self, contacts: Vec<Contact>) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            self.run_blocking(move |store| store.replace_contacts(&contacts))
                .await
                .map_err(|error| SourceError::cache_miss(format!("contact store write failed: {error}")))
        })
    }

    fn load<'a>(&'a self) -> ApiFuture<'a, Vec<Contact>> {
        Box::pin(async move {
            let contacts = self
                .run_blocking(|store| store.read_contacts())
                .await
                .map_err(|error| SourceError::cache_miss(format!("contact store read failed: {error}")))?;

            if contacts.is_empty() {
                return Err(SourceError::cache_miss("no contacts have been cached"));
            }
            Ok(contacts)
        })
    }
}

/// Commits on success, rolls back on failure.
fn finalize_transaction<T>(
    connection: &Connection,
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match result {
        Ok(value) => {
            connection.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(error) => {
            let _ = connection.execute_batch("ROLLBACK");
            Err(error)
        }
    }
}
