//! Copy API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Book, Copy, CopyDetail, CopyForm, CopyFull, RejectedCopyForm},
    services::FormOutcome,
    AppState,
};

/// List all copies with their book references resolved
#[utoipa::path(
    get,
    path = "/copies",
    tag = "copies",
    responses(
        (status = 200, description = "Copy list", body = Vec<CopyFull>)
    )
)]
pub async fn list_copies(State(state): State<AppState>) -> AppResult<Json<Vec<CopyFull>>> {
    let copies = state.services.copies.list().await?;
    Ok(Json(copies))
}

/// Copy detail: the copy with its book resolved, plus the book list for the
/// selection control
#[utoipa::path(
    get,
    path = "/copies/{id}",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy detail", body = CopyDetail),
        (status = 404, description = "Copy not found", body = ErrorResponse)
    )
)]
pub async fn get_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CopyDetail>> {
    let detail = state.services.copies.detail(id).await?;
    Ok(Json(detail))
}

/// Data backing the copy create form: the book list
#[utoipa::path(
    get,
    path = "/copies/form",
    tag = "copies",
    responses(
        (status = 200, description = "Create form data", body = Vec<Book>)
    )
)]
pub async fn get_create_form(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.copies.create_form().await?;
    Ok(Json(books))
}

/// Data backing the copy update form, same composite as the detail view
#[utoipa::path(
    get,
    path = "/copies/{id}/edit",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Update form data", body = CopyDetail),
        (status = 404, description = "Copy not found", body = ErrorResponse)
    )
)]
pub async fn get_update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CopyDetail>> {
    let detail = state.services.copies.detail(id).await?;
    Ok(Json(detail))
}

/// Create a copy. Status defaults to Maintenance when omitted.
#[utoipa::path(
    post,
    path = "/copies",
    tag = "copies",
    request_body = CopyForm,
    responses(
        (status = 201, description = "Copy created", body = Copy),
        (status = 400, description = "Validation failed", body = RejectedCopyForm)
    )
)]
pub async fn create_copy(
    State(state): State<AppState>,
    Json(form): Json<CopyForm>,
) -> AppResult<Response> {
    match state.services.copies.create(&form).await? {
        FormOutcome::Saved(copy) => Ok((StatusCode::CREATED, Json(copy)).into_response()),
        FormOutcome::Invalid(rejected) => {
            Ok((StatusCode::BAD_REQUEST, Json(rejected)).into_response())
        }
    }
}

/// Replace a copy record in full
#[utoipa::path(
    put,
    path = "/copies/{id}",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    request_body = CopyForm,
    responses(
        (status = 200, description = "Copy updated", body = Copy),
        (status = 400, description = "Validation failed", body = RejectedCopyForm),
        (status = 404, description = "Copy not found", body = ErrorResponse)
    )
)]
pub async fn update_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<CopyForm>,
) -> AppResult<Response> {
    match state.services.copies.update(id, &form).await? {
        FormOutcome::Saved(copy) => Ok(Json(copy).into_response()),
        FormOutcome::Invalid(rejected) => {
            Ok((StatusCode::BAD_REQUEST, Json(rejected)).into_response())
        }
    }
}

/// Delete confirmation view: the copy with its book resolved
#[utoipa::path(
    get,
    path = "/copies/{id}/delete",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Delete confirmation view", body = CopyDetail),
        (status = 404, description = "Copy not found", body = ErrorResponse)
    )
)]
pub async fn get_delete_view(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CopyDetail>> {
    let view = state.services.copies.detail(id).await?;
    Ok(Json(view))
}

/// Delete a copy. Nothing references copies, so this always commits,
/// including for ids that no longer exist.
#[utoipa::path(
    delete,
    path = "/copies/{id}",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 204, description = "Copy deleted (or did not exist)")
    )
)]
pub async fn delete_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.copies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
