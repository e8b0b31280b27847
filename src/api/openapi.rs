//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, copies, genres, health, home};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        version = "0.3.0",
        description = "Lending library catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog summary
        home::summary,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::get_create_form,
        authors::get_update_form,
        authors::create_author,
        authors::update_author,
        authors::get_delete_view,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::get_create_form,
        genres::get_update_form,
        genres::create_genre,
        genres::update_genre,
        genres::get_delete_view,
        genres::delete_genre,
        // Books
        books::list_books,
        books::get_book,
        books::get_create_form,
        books::get_update_form,
        books::create_book,
        books::update_book,
        books::get_delete_view,
        books::delete_book,
        // Copies
        copies::list_copies,
        copies::get_copy,
        copies::get_create_form,
        copies::get_update_form,
        copies::create_copy,
        copies::update_copy,
        copies::get_delete_view,
        copies::delete_copy,
    ),
    components(
        schemas(
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorForm,
            crate::models::author::AuthorDetail,
            crate::models::author::RejectedAuthorForm,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::GenreForm,
            crate::models::genre::GenreDetail,
            crate::models::genre::GenreOption,
            crate::models::genre::RejectedGenreForm,
            // Books
            crate::models::book::Book,
            crate::models::book::BookForm,
            crate::models::book::BookFull,
            crate::models::book::BookListEntry,
            crate::models::book::BookDetail,
            crate::models::book::BookFormData,
            crate::models::book::BookUpdateForm,
            crate::models::book::RejectedBookForm,
            // Copies
            crate::models::copy::Copy,
            crate::models::copy::CopyForm,
            crate::models::copy::CopyFull,
            crate::models::copy::CopyDetail,
            crate::models::copy::CopyStatus,
            crate::models::copy::RejectedCopyForm,
            // Validation
            crate::validation::FieldError,
            // Catalog summary
            home::HomeSummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog summary"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "books", description = "Book management"),
        (name = "copies", description = "Copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
