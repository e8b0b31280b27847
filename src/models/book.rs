//! Book model and related types

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, OneOrMany};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{
    author::Author,
    copy::Copy,
    genre::{Genre, GenreOption},
};
use crate::validation::FieldError;

/// Full book record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book with author and genre references resolved to full records.
/// The author may be absent when the stored reference no longer resolves.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookFull {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

impl BookFull {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book listing entry: title plus resolved author name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookListEntry {
    pub id: i32,
    pub title: String,
    pub author_name: Option<String>,
}

/// Submitted book form fields (create and update).
///
/// The genre field accepts a single id or a list and is coerced to a list;
/// absent means empty.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: Option<i32>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub isbn: String,
    #[serde_as(as = "OneOrMany<_>")]
    #[serde(default)]
    pub genre: Vec<i32>,
}

/// Composite view for book detail and delete confirmation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    pub book: BookFull,
    pub copies: Vec<Copy>,
}

/// Data backing the book create/update form: all authors plus all genres,
/// the latter flagged with current associations for multi-select pre-selection
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookFormData {
    pub authors: Vec<Author>,
    pub genres: Vec<GenreOption>,
}

/// Data backing the book update form: the book plus the form lists
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookUpdateForm {
    pub book: BookFull,
    pub form: BookFormData,
}

/// A rejected book submission: sanitized values, field errors, and the form
/// lists needed to re-present the form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RejectedBookForm {
    pub values: BookForm,
    pub errors: Vec<FieldError>,
    pub form: BookFormData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_field_coerces_single_value_to_singleton() {
        let form: BookForm =
            serde_json::from_str(r#"{"title":"T","author":1,"summary":"S","isbn":"I","genre":4}"#)
                .unwrap();
        assert_eq!(form.genre, vec![4]);
    }

    #[test]
    fn genre_field_absent_coerces_to_empty() {
        let form: BookForm =
            serde_json::from_str(r#"{"title":"T","author":1,"summary":"S","isbn":"I"}"#).unwrap();
        assert!(form.genre.is_empty());
    }

    #[test]
    fn genre_field_list_passes_through() {
        let form: BookForm = serde_json::from_str(
            r#"{"title":"T","author":1,"summary":"S","isbn":"I","genre":[2,5,9]}"#,
        )
        .unwrap();
        assert_eq!(form.genre, vec![2, 5, 9]);
    }

    #[test]
    fn missing_author_deserializes_as_none() {
        let form: BookForm = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert_eq!(form.author, None);
    }
}
