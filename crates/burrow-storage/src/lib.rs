//! Storage backends for the Burrow URL shortener.
//!
//! [`SqliteUrlStore`] is the durable store. [`InMemoryUrlStore`] honours the
//! same contract without touching disk and is meant for tests.

pub mod memory;
pub mod sqlite;

pub use burrow_core::{Alias, ErrorKind, ReadUrlStore, Result, StoreError, UrlRecord, UrlStore};
pub use memory::InMemoryUrlStore;
pub use sqlite::{classify, SqliteOptions, SqliteUrlStore};
