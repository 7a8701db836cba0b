//! HTTP front end of the Burrow URL shortener.
//!
//! Extracts and validates the alias, calls the store, and turns the store's
//! outcome into a status code and a small JSON body. Nothing in here looks
//! at engine-specific errors.

pub mod app;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use auth::BasicCredentials;
pub use error::AppError;
pub use state::AppState;
