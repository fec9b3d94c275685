//! Axum router configuration with middleware.
//!
//! Two API routes; everything else falls through to the embedded frontend.
//! Middleware: CORS (any origin; GET, POST, OPTIONS; Content-Type) and
//! request tracing. The two non-preflight CORS headers are set on every
//! response so the wire surface matches what the frontend was written
//! against.

use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::post;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::HttpState;

/// The single-page chat interface, embedded at compile time.
static INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Build the complete router with all routes and middleware.
pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/clear", post(handlers::chat::clear))
        .fallback(frontend)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Fallback for everything outside `/api/`: serve the chat page.
///
/// A bare OPTIONS request that is not a CORS preflight (those are answered
/// by the CORS layer before reaching here) gets an empty response.
async fn frontend(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    Html(INDEX_HTML).into_response()
}
