//! Handlers for landing rows.
//!
//! The public listing is unauthenticated; every mutation and the audit trail
//! require the admin role. The authenticated subject becomes the `actorId`
//! of the audit entry.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use landing_core::model::{CreateRow, MutationOptions, ReorderRows, UpdateRow};
use landing_core::types::RowId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn options_for(state: &AppState, admin: AuthUser) -> MutationOptions {
    MutationOptions::new(state.config.max_cards, Some(admin.user_id))
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/landing-rows
///
/// Every row in display order, each card with all of its fields.
pub async fn list_landing_rows(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut rows = state.store.list().await?;
    rows.sort_by_key(|row| row.order);

    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/landing-rows
pub async fn create_landing_row(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<CreateRow>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let options = options_for(&state, admin);
    let row = state.store.add(input, options).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/admin/landing-rows/{id}
///
/// Omitted fields keep their current value. A numeric `order` is a
/// position hint, not a stored value.
pub async fn update_landing_row(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(row_id): Path<RowId>,
    payload: Result<Json<UpdateRow>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let options = options_for(&state, admin);
    let row = state.store.update(row_id, input, options).await?;

    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/admin/landing-rows/{id}
pub async fn delete_landing_row(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(row_id): Path<RowId>,
) -> AppResult<impl IntoResponse> {
    let options = options_for(&state, admin);
    state.store.remove(row_id, options).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/landing-rows/reorder
///
/// Body: `{ "ids": [...] }` listing every row exactly once.
pub async fn reorder_landing_rows(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<ReorderRows>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let options = options_for(&state, admin);
    let rows = state.store.reorder(input, options).await?;

    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/admin/landing-rows/audit
pub async fn list_landing_row_audit(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = state.store.audit_entries().await?;

    Ok(Json(DataResponse { data: entries }))
}
