pub mod health;
pub mod landing_rows;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /landing-rows                      public listing
///
/// /admin/landing-rows                create (admin only)
/// /admin/landing-rows/reorder        bulk reorder (PUT)
/// /admin/landing-rows/audit          audit trail (GET)
/// /admin/landing-rows/{id}           update (PUT), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/landing-rows", landing_rows::public_router())
        .nest("/admin/landing-rows", landing_rows::admin_router())
}
