// crates/xrgate-rpc/src/handlers/pages.rs
//
// Landing page and route-source handlers.

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use http::header::CONTENT_TYPE;

use crate::server::{AppState, ROUTE_SOURCE};

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

/// GET /server.rs: the route table, as plain text.
pub async fn handle_route_source() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], ROUTE_SOURCE)
}
