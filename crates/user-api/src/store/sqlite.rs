//! # SQLite User Store
//!
//! Persists users in a `users` table through a `sqlx` connection pool. The
//! table is created on connect if it does not exist; there is no migration
//! machinery beyond that.

use crate::model::{same_name, User, UserId};
use crate::store::{StoreError, UserStore};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, instrument};

const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS users (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT    NOT NULL,
    rate       REAL    NOT NULL DEFAULT 0,
    area       INTEGER NOT NULL DEFAULT 0,
    occupancy  INTEGER NOT NULL DEFAULT 0,
    amenity    TEXT    NOT NULL DEFAULT '',
    image_url  TEXT    NOT NULL DEFAULT '',
    details    TEXT    NOT NULL DEFAULT ''
)";

const SELECT_USERS: &str =
    "SELECT id, name, rate, area, occupancy, amenity, image_url, details FROM users";

/// Row shape of the `users` table.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    rate: f64,
    area: i32,
    occupancy: i32,
    amenity: String,
    image_url: String,
    details: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            name: row.name,
            rate: row.rate,
            area: row.area,
            occupancy: row.occupancy,
            amenity: row.amenity,
            image_url: row.image_url,
            details: row.details,
        }
    }
}

// Every connection to an in-memory database opens a fresh one, so the pool
// is pinned to a single connection that is never recycled.
fn pool_options(url: &str) -> SqlitePoolOptions {
    if url.contains(":memory:") || url.contains("mode=memory") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

/// [`UserStore`] backed by a SQLite database.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Connects to `url` (for example `sqlite://users.db?mode=rwc`) and
    /// creates the `users` table if needed.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = pool_options(url).connect(url).await?;
        info!(url, "Connected to SQLite");
        Self::with_pool(pool).await
    }

    /// A private in-memory database, mostly for tests.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:").await
    }

    /// Wraps an existing pool, creating the `users` table if needed.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USERS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USERS} WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    // SQLite's lower() only folds ASCII, so names are compared on this side
    // with the same rule the in-memory store uses.
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        Ok(self.list().await?.into_iter().find(|user| user.has_same_name(name)))
    }

    #[instrument(skip(self), fields(name = %user.name))]
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        // The write lock must be held before the name scan.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM users")
            .fetch_all(&mut *tx)
            .await?;
        if names.iter().any(|existing| same_name(existing, &user.name)) {
            return Err(StoreError::DuplicateName(user.name));
        }

        let id = sqlx::query(
            "INSERT INTO users (name, rate, area, occupancy, amenity, image_url, details)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.name)
        .bind(user.rate)
        .bind(user.area)
        .bind(user.occupancy)
        .bind(&user.amenity)
        .bind(&user.image_url)
        .bind(&user.details)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;
        debug!(id, "Inserted");
        Ok(user.with_id(UserId(id)))
    }

    #[instrument(skip(self), fields(id = %user.id))]
    async fn replace(&self, user: User) -> Result<User, StoreError> {
        let result = sqlx::query(
            "UPDATE users
             SET name = ?, rate = ?, area = ?, occupancy = ?, amenity = ?, image_url = ?, details = ?
             WHERE id = ?",
        )
        .bind(&user.name)
        .bind(user.rate)
        .bind(user.area)
        .bind(user.occupancy)
        .bind(&user.amenity)
        .bind(&user.image_url)
        .bind(&user.details)
        .bind(user.id.0)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(user.id.to_string()));
        }
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
