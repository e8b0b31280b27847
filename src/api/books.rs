//! Book API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{
        Book, BookDetail, BookForm, BookFormData, BookListEntry, BookUpdateForm, RejectedBookForm,
    },
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

/// List all books with author names resolved, title ascending
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list", body = Vec<BookListEntry>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<BookListEntry>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Book detail: author and genres resolved, plus the book's copies
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book detail", body = BookDetail),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let detail = state.services.books.detail(id).await?;
    Ok(Json(detail))
}

/// Data backing the book create form: author and genre lists
#[utoipa::path(
    get,
    path = "/books/form",
    tag = "books",
    responses(
        (status = 200, description = "Create form data", body = BookFormData)
    )
)]
pub async fn get_create_form(State(state): State<AppState>) -> AppResult<Json<BookFormData>> {
    let form = state.services.books.create_form().await?;
    Ok(Json(form))
}

/// Data backing the book update form: the book plus the form lists, with
/// currently associated genres flagged
#[utoipa::path(
    get,
    path = "/books/{id}/edit",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Update form data", body = BookUpdateForm),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookUpdateForm>> {
    let form = state.services.books.update_form(id).await?;
    Ok(Json(form))
}

/// Create a book. A single genre id is accepted and coerced to a one-element
/// set; no genre means an empty set.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Validation failed", body = RejectedBookForm)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(form): Json<BookForm>,
) -> AppResult<Response> {
    match state.services.books.create(&form).await? {
        FormOutcome::Saved(book) => Ok((StatusCode::CREATED, Json(book)).into_response()),
        FormOutcome::Invalid(rejected) => {
            Ok((StatusCode::BAD_REQUEST, Json(rejected)).into_response())
        }
    }
}

/// Replace a book record in full, genre links included
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookForm,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Validation failed", body = RejectedBookForm),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<BookForm>,
) -> AppResult<Response> {
    match state.services.books.update(id, &form).await? {
        FormOutcome::Saved(book) => Ok(Json(book).into_response()),
        FormOutcome::Invalid(rejected) => {
            Ok((StatusCode::BAD_REQUEST, Json(rejected)).into_response())
        }
    }
}

/// Delete confirmation view: the book plus the copies blocking deletion
#[utoipa::path(
    get,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Delete confirmation view", body = BookDetail),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_delete_view(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let view = state.services.books.delete_view(id).await?;
    Ok(Json(view))
}

/// Delete a book unless copies still reference it
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted (or did not exist)"),
        (status = 409, description = "Copies still reference this book", body = BookDetail)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.books.delete(id).await? {
        DeleteOutcome::Committed => Ok(StatusCode::NO_CONTENT.into_response()),
        DeleteOutcome::Blocked(view) => Ok((StatusCode::CONFLICT, Json(view)).into_response()),
    }
}
