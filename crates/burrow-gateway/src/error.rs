use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::{ErrorKind, StoreError};
use thiserror::Error;

use crate::model::ApiResponse;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures a handler reports to the client.
///
/// The messages are what the client sees. Internal errors stay opaque; the
/// handler logs the cause before returning one.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to decode request")]
    Decode,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("url already exists")]
    AlreadyExists,
    #[error("internal error")]
    Internal,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Decode | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AlreadyExists => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&StoreError> for AppError {
    fn from(error: &StoreError) -> Self {
        match error.kind() {
            ErrorKind::AlreadyExists => AppError::AlreadyExists,
            ErrorKind::NotFound => AppError::NotFound,
            ErrorKind::Storage => AppError::Internal,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(ApiResponse::error(self.to_string()))).into_response();

        if let AppError::Unauthorized = self {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(r#"Basic realm="burrow""#),
            );
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let cases = [
            (StoreError::AlreadyExists("a".into()), StatusCode::CONFLICT),
            (StoreError::NotFound("a".into()), StatusCode::NOT_FOUND),
            (
                StoreError::storage("storage.sqlite.get_url", "disk I/O error"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::initialization("storage.sqlite.open", "unable to open"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (store_error, expected) in cases {
            assert_eq!(AppError::from(&store_error).status_code(), expected);
        }
    }

    #[test]
    fn internal_error_hides_cause() {
        let error = AppError::from(&StoreError::storage("op", "secret detail"));
        assert_eq!(error.to_string(), "internal error");
    }

    #[test]
    fn unauthorized_sets_challenge() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }
}
