//! SQLite-backed record store for todo items.
//!
//! `Store` owns the connection pool and the `todos` schema. Handlers never
//! touch the pool directly: each request opens a [`Session`], which holds one
//! pooled connection and hands it back when dropped, whichever way the
//! handler exits.
//!
//! Absence is not an error here. Lookups return `Option` and deletes return
//! `bool`; only driver failures come back as [`StoreError`].

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, info};

use crate::models::{FieldChange, NewTodo, Page, TodoItem, TodoPatch};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT      NOT NULL,
    description TEXT,
    completed   BOOLEAN   NOT NULL DEFAULT 0,
    created_at  TIMESTAMP NOT NULL,
    updated_at  TIMESTAMP
)
"#;

const CREATE_TITLE_INDEX: &str = "CREATE INDEX IF NOT EXISTS ix_todos_title ON todos (title)";

const RETURNING: &str = " RETURNING id, title, description, completed, created_at, updated_at";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open todo store at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Process-wide handle to the todo database. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the database at `url`, creating the file if it does not exist yet.
    ///
    /// In-memory URLs are routed to [`Store::in_memory`], since every pooled
    /// connection to `:memory:` would otherwise see its own empty database.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        if url.contains(":memory:") {
            return Self::in_memory().await;
        }
        let connect_err = |source| StoreError::Connect {
            url: url.to_string(),
            source,
        };
        let options = SqliteConnectOptions::from_str(url)
            .map_err(connect_err)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(connect_err)?;
        info!(%url, max_connections, "opened todo store");
        Ok(Self { pool })
    }

    /// A private in-memory database, used by tests and `sqlite::memory:`.
    ///
    /// Backed by a single connection that never idles out so the data lives
    /// as long as the store.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create the `todos` table and its title index. Safe to call repeatedly.
    pub async fn initialize_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_TITLE_INDEX).execute(&self.pool).await?;
        debug!("todo schema ready");
        Ok(())
    }

    /// Check out a connection for one unit of work.
    pub async fn session(&self) -> Result<Session, StoreError> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    /// Wait for outstanding sessions to finish and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("closed todo store");
    }
}

/// One request's view of the store. Dropping it returns the connection.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    pub async fn insert(&mut self, new: &NewTodo) -> Result<TodoItem, StoreError> {
        let item = sqlx::query_as::<_, TodoItem>(
            "INSERT INTO todos (title, description, completed, created_at) VALUES (?, ?, ?, ?) \
             RETURNING id, title, description, completed, created_at, updated_at",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.completed)
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(item)
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        let item = sqlx::query_as::<_, TodoItem>(
            "SELECT id, title, description, completed, created_at, updated_at \
             FROM todos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(item)
    }

    /// Rows in id order, windowed by `page`.
    pub async fn list_all(&mut self, page: Page) -> Result<Vec<TodoItem>, StoreError> {
        let items = sqlx::query_as::<_, TodoItem>(
            "SELECT id, title, description, completed, created_at, updated_at \
             FROM todos ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(items)
    }

    pub async fn list_by_status(&mut self, completed: bool) -> Result<Vec<TodoItem>, StoreError> {
        let items = sqlx::query_as::<_, TodoItem>(
            "SELECT id, title, description, completed, created_at, updated_at \
             FROM todos WHERE completed = ? ORDER BY id",
        )
        .bind(completed)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(items)
    }

    /// Apply the fields present in `patch` and stamp `updated_at`.
    ///
    /// Returns `None` when no row has this id.
    pub async fn update(
        &mut self,
        id: i64,
        patch: &TodoPatch,
    ) -> Result<Option<TodoItem>, StoreError> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE todos SET ");
        let mut assignments = query.separated(", ");
        for change in patch.changes() {
            match change {
                FieldChange::Title(title) => {
                    assignments.push("title = ").push_bind_unseparated(title.clone());
                }
                FieldChange::Description(description) => {
                    assignments
                        .push("description = ")
                        .push_bind_unseparated(description.clone());
                }
                FieldChange::Completed(completed) => {
                    assignments.push("completed = ").push_bind_unseparated(*completed);
                }
            }
        }
        assignments.push("updated_at = ").push_bind_unseparated(Utc::now());
        query.push(" WHERE id = ").push_bind(id).push(RETURNING);

        let item = query
            .build_query_as::<TodoItem>()
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(item)
    }

    /// Returns `true` when a row was removed.
    pub async fn delete(&mut self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
