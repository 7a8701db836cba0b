use async_trait::async_trait;
use burrow_core::{Alias, ErrorKind, ReadUrlStore, Result, StoreError, UrlStore};
use sqlx::error::DatabaseError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS url(
        id INTEGER PRIMARY KEY,
        alias TEXT NOT NULL UNIQUE,
        url TEXT NOT NULL)
"#;

const CREATE_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_aliases ON url(alias)
"#;

// Extended result codes, see https://www.sqlite.org/rescode.html
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";

/// Connection settings for [`SqliteUrlStore::open_with`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct SqliteOptions {
    #[builder(default = 5)]
    max_connections: u32,
    /// How long a connection waits on a locked database before giving up.
    #[builder(default = Duration::from_secs(5))]
    busy_timeout: Duration,
    #[builder(default = true)]
    create_if_missing: bool,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// SQLite implementation of the store contract.
///
/// Every operation is a single statement, so atomicity and locking are left
/// to SQLite. The store keeps no state besides the pool and is cheap to clone.
#[derive(Debug, Clone)]
pub struct SqliteUrlStore {
    pool: SqlitePool,
}

impl SqliteUrlStore {
    /// Creates a store from an existing pool.
    ///
    /// The schema is not touched; call [`SqliteUrlStore::init_schema`] if the
    /// database may be fresh.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (or creates) the database at `path` with default options and
    /// makes sure the schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, SqliteOptions::default()).await
    }

    /// Opens (or creates) the database at `path` and makes sure the schema
    /// exists. Safe to call on an already initialized database.
    pub async fn open_with(path: impl AsRef<Path>, options: SqliteOptions) -> Result<Self> {
        const OP: &str = "storage.sqlite.open";
        let path = path.as_ref();

        let connect_options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(options.create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(options.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::initialization(OP, e))?;

        let store = Self::new(pool);
        store.init_schema().await?;

        debug!(path = %path.display(), "sqlite store ready");
        Ok(store)
    }

    /// Creates the `url` table and its alias index if they are missing.
    pub async fn init_schema(&self) -> Result<()> {
        const OP: &str = "storage.sqlite.init_schema";

        for statement in [CREATE_TABLE, CREATE_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::initialization(OP, e))?;
        }

        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Sorts an sqlx error into the store's [`ErrorKind`].
///
/// Uniqueness is detected from the driver's constraint signal, never from
/// the message text.
pub fn classify(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        err if err.as_database_error().is_some_and(is_unique_violation) => {
            ErrorKind::AlreadyExists
        }
        _ => ErrorKind::Storage,
    }
}

fn is_unique_violation(err: &(dyn DatabaseError + 'static)) -> bool {
    err.is_unique_violation()
        || matches!(
            err.code().as_deref(),
            Some(SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY)
        )
}

fn map_sqlx_error(op: &'static str, alias: &Alias, err: sqlx::Error) -> StoreError {
    match classify(&err) {
        ErrorKind::AlreadyExists => StoreError::AlreadyExists(alias.to_string()),
        ErrorKind::NotFound => StoreError::NotFound(alias.to_string()),
        ErrorKind::Storage => StoreError::storage(op, err),
    }
}

#[async_trait]
impl ReadUrlStore for SqliteUrlStore {
    async fn get_url(&self, alias: &Alias) -> Result<String> {
        const OP: &str = "storage.sqlite.get_url";

        let url: String = sqlx::query_scalar("SELECT url FROM url WHERE alias = ?")
            .bind(alias.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(OP, alias, e))?;

        trace!(alias = %alias, "resolved alias");
        Ok(url)
    }
}

#[async_trait]
impl UrlStore for SqliteUrlStore {
    async fn save_url(&self, url: &str, alias: &Alias) -> Result<i64> {
        const OP: &str = "storage.sqlite.save_url";

        let result = sqlx::query("INSERT INTO url(url, alias) VALUES(?, ?)")
            .bind(url)
            .bind(alias.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(OP, alias, e))?;

        let id = result.last_insert_rowid();
        trace!(alias = %alias, id, "saved url");
        Ok(id)
    }

    async fn delete_url(&self, alias: &Alias) -> Result<()> {
        const OP: &str = "storage.sqlite.delete_url";

        let result = sqlx::query("DELETE FROM url WHERE alias = ?")
            .bind(alias.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(OP, alias, e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(alias.to_string()));
        }

        trace!(alias = %alias, "deleted alias");
        Ok(())
    }
}
