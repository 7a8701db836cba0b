use std::time::Duration;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::auth::require_basic_auth;
use crate::handlers::{
    delete_url_handler, health_handler, redirect_handler, request_id, save_url_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Routes only, without middleware. Basic auth is applied to `/url` when
    /// the state carries credentials.
    pub fn routes(state: AppState) -> Router {
        let mut url_routes = Router::new()
            .route("/", post(save_url_handler))
            .route("/{alias}", delete(delete_url_handler));

        if let Some(credentials) = state.credentials().cloned() {
            url_routes =
                url_routes.route_layer(middleware::from_fn_with_state(credentials, require_basic_auth));
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/{alias}", get(redirect_handler))
            .nest("/url", url_routes)
            .with_state(state)
    }

    /// The full application: routes plus request ids, tracing and a
    /// per-request timeout.
    pub fn router(state: AppState, request_timeout: Duration) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = request_id(request.headers()),
                )
            }))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            ));

        Self::routes(state).layer(middleware)
    }
}
