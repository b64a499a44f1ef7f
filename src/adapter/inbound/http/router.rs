//! Route table and CORS layer.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;

use super::{asset, handler};
use crate::port::inbound::race::RaceTracker;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<dyn RaceTracker>,
}

/// Build the API and mini-app routes.
pub fn router(tracker: Arc<dyn RaceTracker>) -> Router {
    Router::new()
        .route("/", get(asset::index))
        .route("/app.js", get(asset::script))
        .route("/style.css", get(asset::stylesheet))
        .route("/health", get(handler::health))
        .route("/stats", get(handler::get_stats))
        .route("/view", get(handler::get_view))
        .route(
            "/race-window",
            get(handler::get_window).post(handler::post_window),
        )
        .route("/distance", put(handler::put_distance))
        .route("/distance/increment", post(handler::increment_distance))
        .route(
            "/distance/laps",
            post(handler::add_laps).put(handler::put_laps),
        )
        .route("/reset", post(handler::reset))
        .layer(middleware::from_fn(cors))
        .with_state(AppState { tracker })
}

/// Answer preflight requests and tag every response as readable from any
/// origin.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
