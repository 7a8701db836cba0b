//! Core types and traits for the Burrow URL shortener.
//!
//! This crate holds what both the storage backends and the HTTP gateway
//! agree on: the [`Alias`] key, the stored [`UrlRecord`], the store traits
//! and the closed [`StoreError`] vocabulary the backends translate engine
//! failures into.

pub mod alias;
pub mod error;
pub mod store;

pub use alias::Alias;
pub use error::{AliasError, BoxError, ErrorKind, Result, StoreError};
pub use store::{ReadUrlStore, UrlRecord, UrlStore};
