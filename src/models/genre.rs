//! Genre model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::book::Book;
use crate::validation::FieldError;

/// Full genre record. Names are unique by exact match, enforced by the
/// create-or-reuse path rather than a storage constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Submitted genre form fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

/// Composite view for genre detail and delete confirmation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

/// Genre entry for the book form multi-select, flagged when already associated
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreOption {
    pub id: i32,
    pub name: String,
    pub checked: bool,
}

/// A rejected genre submission: sanitized values plus field errors
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RejectedGenreForm {
    pub values: GenreForm,
    pub errors: Vec<FieldError>,
}
