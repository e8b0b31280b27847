//! Author API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Author, AuthorDetail, AuthorForm, RejectedAuthorForm},
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

/// List all authors, family name ascending
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Author detail: the author plus all their books
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author detail", body = AuthorDetail),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetail>> {
    let detail = state.services.authors.detail(id).await?;
    Ok(Json(detail))
}

/// Data backing the author create form (none needed)
#[utoipa::path(
    get,
    path = "/authors/form",
    tag = "authors",
    responses(
        (status = 200, description = "Create form data")
    )
)]
pub async fn get_create_form() -> Json<Value> {
    Json(json!({}))
}

/// Data backing the author update form: the current record
#[utoipa::path(
    get,
    path = "/authors/{id}/edit",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Update form data", body = Author),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.update_form(id).await?;
    Ok(Json(author))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = AuthorForm,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Validation failed", body = RejectedAuthorForm)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(&form).await? {
        FormOutcome::Saved(author) => Ok((StatusCode::CREATED, Json(author)).into_response()),
        FormOutcome::Invalid(rejected) => {
            Ok((StatusCode::BAD_REQUEST, Json(rejected)).into_response())
        }
    }
}

/// Replace an author record in full
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = AuthorForm,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Validation failed", body = RejectedAuthorForm),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.update(id, &form).await? {
        FormOutcome::Saved(author) => Ok(Json(author).into_response()),
        FormOutcome::Invalid(rejected) => {
            Ok((StatusCode::BAD_REQUEST, Json(rejected)).into_response())
        }
    }
}

/// Delete confirmation view: the author plus the books blocking deletion
#[utoipa::path(
    get,
    path = "/authors/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Delete confirmation view", body = AuthorDetail),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_delete_view(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetail>> {
    let view = state.services.authors.delete_view(id).await?;
    Ok(Json(view))
}

/// Delete an author unless books still reference them
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted (or did not exist)"),
        (status = 409, description = "Books still reference this author", body = AuthorDetail)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Committed => Ok(StatusCode::NO_CONTENT.into_response()),
        DeleteOutcome::Blocked(view) => Ok((StatusCode::CONFLICT, Json(view)).into_response()),
    }
}
