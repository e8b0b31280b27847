//! Genre API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Genre, GenreDetail, GenreForm, RejectedGenreForm},
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

/// List all genres, name ascending
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genre list", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.genres.list().await?;
    Ok(Json(genres))
}

/// Genre detail: the genre plus all books tagged with it
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre detail", body = GenreDetail),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<GenreDetail>> {
    let detail = state.services.genres.detail(id).await?;
    Ok(Json(detail))
}

/// Data backing the genre create form (none needed)
#[utoipa::path(
    get,
    path = "/genres/form",
    tag = "genres",
    responses(
        (status = 200, description = "Create form data")
    )
)]
pub async fn get_create_form() -> Json<Value> {
    Json(json!({}))
}

/// Data backing the genre update form: the current record
#[utoipa::path(
    get,
    path = "/genres/{id}/edit",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Update form data", body = Genre),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    )
)]
pub async fn get_update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.update_form(id).await?;
    Ok(Json(genre))
}

/// Create a genre, reusing an existing record on an exact name match.
/// Both a fresh insert and a reuse report success with the surviving record.
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    request_body = GenreForm,
    responses(
        (status = 201, description = "Genre created or reused", body = Genre),
        (status = 400, description = "Validation failed", body = RejectedGenreForm)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(form): Json<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create(&form).await? {
        FormOutcome::Saved(genre) => Ok((StatusCode::CREATED, Json(genre)).into_response()),
        FormOutcome::Invalid(rejected) => {
            Ok((StatusCode::BAD_REQUEST, Json(rejected)).into_response())
        }
    }
}

/// Replace a genre record in full
#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = GenreForm,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 400, description = "Validation failed", body = RejectedGenreForm),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.update(id, &form).await? {
        FormOutcome::Saved(genre) => Ok(Json(genre).into_response()),
        FormOutcome::Invalid(rejected) => {
            Ok((StatusCode::BAD_REQUEST, Json(rejected)).into_response())
        }
    }
}

/// Delete confirmation view: the genre plus the books blocking deletion
#[utoipa::path(
    get,
    path = "/genres/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Delete confirmation view", body = GenreDetail),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    )
)]
pub async fn get_delete_view(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<GenreDetail>> {
    let view = state.services.genres.delete_view(id).await?;
    Ok(Json(view))
}

/// Delete a genre unless books still reference it
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted (or did not exist)"),
        (status = 409, description = "Books still reference this genre", body = GenreDetail)
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Committed => Ok(StatusCode::NO_CONTENT.into_response()),
        DeleteOutcome::Blocked(view) => Ok((StatusCode::CONFLICT, Json(view)).into_response()),
    }
}
