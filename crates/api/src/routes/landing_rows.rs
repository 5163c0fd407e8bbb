//! Route definitions for landing rows.
//!
//! Two routers are provided:
//! - `public_router()` mounted at `/landing-rows`
//! - `admin_router()` mounted at `/admin/landing-rows`

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::landing_rows;
use crate::state::AppState;

/// Public listing mounted at `/landing-rows`.
///
/// ```text
/// GET /  -> list_landing_rows
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(landing_rows::list_landing_rows))
}

/// Admin routes mounted at `/admin/landing-rows`.
///
/// Static segments take precedence over `{id}`, so `reorder` and `audit`
/// are never treated as row ids.
///
/// ```text
/// POST   /          -> create_landing_row
/// PUT    /reorder   -> reorder_landing_rows
/// GET    /audit     -> list_landing_row_audit
/// PUT    /{id}      -> update_landing_row
/// DELETE /{id}      -> delete_landing_row
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(landing_rows::create_landing_row))
        .route("/reorder", put(landing_rows::reorder_landing_rows))
        .route("/audit", get(landing_rows::list_landing_row_audit))
        .route(
            "/{id}",
            put(landing_rows::update_landing_row).delete(landing_rows::delete_landing_row),
        )
}
