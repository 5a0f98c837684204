//! # User Stores
//!
//! [`UserStore`] is the seam between the HTTP handlers and storage. Two
//! implementations exist:
//!
//! - [`UserClient`](crate::clients::UserClient): in memory, owned by the user actor
//! - [`SqliteUserStore`]: a SQLite table through `sqlx`
//!
//! Both assign ids themselves (ids on input are ignored), never reuse an id,
//! and re-check name uniqueness atomically on insert.

pub mod error;
pub mod sqlite;

pub use error::StoreError;
pub use sqlite::SqliteUserStore;

use crate::model::{User, UserId};
use async_trait::async_trait;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user, in ascending id order.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// The user whose name equals `name` ignoring case.
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, StoreError>;

    /// Stores `user` under a fresh id and returns the stored record.
    ///
    /// Fails with [`StoreError::DuplicateName`] when the name is taken.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Overwrites the record with `user.id`.
    ///
    /// Fails with [`StoreError::NotFound`] when no such record exists.
    async fn replace(&self, user: User) -> Result<User, StoreError>;

    /// Removes the record with `id`. Returns false if there was none.
    async fn delete(&self, id: UserId) -> Result<bool, StoreError>;
}
