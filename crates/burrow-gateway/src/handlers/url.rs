use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::{Alias, ErrorKind};
use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::handlers::request_id;
use crate::model::{ApiResponse, SaveUrlRequest};
use crate::state::AppState;

pub async fn save_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<SaveUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse>)> {
    const OP: &str = "handlers.url.save";
    let request_id = request_id(&headers);

    let Json(request) = payload.map_err(|rejection| {
        error!(op = OP, request_id, error = %rejection, "failed to decode request body");
        AppError::Decode
    })?;
    debug!(op = OP, request_id, ?request, "request body decoded");

    if let Err(reason) = validate_url(&request.url) {
        warn!(op = OP, request_id, url = %request.url, reason, "invalid url");
        return Err(AppError::InvalidRequest(reason.to_string()));
    }
    let alias = Alias::new(request.alias).map_err(|e| {
        warn!(op = OP, request_id, error = %e, "invalid alias");
        AppError::InvalidRequest("field alias is a required field".to_string())
    })?;

    let id = state
        .store()
        .save_url(&request.url, &alias)
        .await
        .map_err(|e| {
            match e.kind() {
                ErrorKind::AlreadyExists => {
                    info!(op = OP, request_id, url = %request.url, alias = %alias, "url already exists")
                }
                _ => error!(op = OP, request_id, error = %e, "failed to add url"),
            }
            AppError::from(&e)
        })?;

    info!(op = OP, request_id, id, alias = %alias, "url added");
    Ok((StatusCode::CREATED, Json(ApiResponse::saved(alias.as_str()))))
}

pub async fn redirect_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(alias): Path<String>,
) -> Result<Response> {
    const OP: &str = "handlers.url.redirect";
    let request_id = request_id(&headers);

    let alias = Alias::new(alias).map_err(|_| {
        warn!(op = OP, request_id, "alias is empty");
        AppError::InvalidRequest("invalid request".to_string())
    })?;

    let url = state.store().get_url(&alias).await.map_err(|e| {
        match e.kind() {
            ErrorKind::NotFound => warn!(op = OP, request_id, alias = %alias, "url not found"),
            _ => error!(op = OP, request_id, error = %e, "failed to get url"),
        }
        AppError::from(&e)
    })?;

    let location = HeaderValue::from_str(&url).map_err(|e| {
        error!(op = OP, request_id, alias = %alias, error = %e, "stored url is not a valid header value");
        AppError::Internal
    })?;

    info!(op = OP, request_id, alias = %alias, url = %url, "redirecting");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

pub async fn delete_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(alias): Path<String>,
) -> Result<Json<ApiResponse>> {
    const OP: &str = "handlers.url.delete";
    let request_id = request_id(&headers);

    let alias = Alias::new(alias).map_err(|_| {
        warn!(op = OP, request_id, "alias is empty");
        AppError::InvalidRequest("invalid request".to_string())
    })?;

    state.store().delete_url(&alias).await.map_err(|e| {
        match e.kind() {
            ErrorKind::NotFound => warn!(op = OP, request_id, alias = %alias, "url not found"),
            _ => error!(op = OP, request_id, error = %e, "failed to delete url"),
        }
        AppError::from(&e)
    })?;

    debug!(op = OP, request_id, alias = %alias, "alias deleted");
    Ok(Json(ApiResponse::ok()))
}

/// Checks that the URL has an http(s) scheme and a host.
fn validate_url(url: &str) -> std::result::Result<(), &'static str> {
    if url.is_empty() {
        return Err("field url is a required field");
    }

    let Some((scheme, rest)) = url.split_once("://") else {
        return Err("field url is not a valid URL");
    };
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return Err("field url is not a valid URL");
    }

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err("field url is not a valid URL");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_url;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1#frag").is_ok());
        assert!(validate_url("HTTPS://EXAMPLE.COM").is_ok());
        assert!(validate_url("http://localhost:8080").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(validate_url(""), Err("field url is a required field"));
    }

    #[test]
    fn rejects_missing_scheme_or_host() {
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("https://").is_err());
        assert!(validate_url("https:///path").is_err());
        assert!(validate_url("://example.com").is_err());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("javascript://alert(1)").is_err());
    }
}
