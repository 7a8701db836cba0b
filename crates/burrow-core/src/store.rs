use crate::alias::Alias;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A stored alias → URL mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Identifier assigned by the storage engine.
    pub id: i64,
    /// The unique short key.
    pub alias: Alias,
    /// The target address.
    pub url: String,
}

/// A read-only view of a URL store.
///
/// The redirect path only needs lookups, so it can be handed this trait
/// instead of the full [`UrlStore`].
#[async_trait]
pub trait ReadUrlStore: Send + Sync + 'static {
    /// Returns the URL stored under `alias`.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) when
    /// no record matches.
    async fn get_url(&self, alias: &Alias) -> Result<String>;
}

#[async_trait]
pub trait UrlStore: ReadUrlStore {
    /// Stores `url` under `alias` and returns the new record id.
    ///
    /// Fails with [`StoreError::AlreadyExists`](crate::StoreError::AlreadyExists)
    /// if the alias is taken.
    async fn save_url(&self, url: &str, alias: &Alias) -> Result<i64>;

    /// Removes the record stored under `alias`.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) if
    /// nothing was removed.
    async fn delete_url(&self, alias: &Alias) -> Result<()>;
}
