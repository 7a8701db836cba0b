//! Disposable fixtures for integration tests.

mod error;
pub mod sqlite;

pub use error::{Result, TestInfraError};
