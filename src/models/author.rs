//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::book::Book;
use crate::validation::FieldError;

/// Full author record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, family name first
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Human-readable lifespan, missing ends left blank
    pub fn lifespan(&self) -> String {
        let fmt = |d: &Option<NaiveDate>| {
            d.map(|d| d.format("%B %-d, %Y").to_string())
                .unwrap_or_default()
        };
        format!("{} - {}", fmt(&self.date_of_birth), fmt(&self.date_of_death))
    }

    /// Birth date formatted for an HTML date control
    pub fn date_of_birth_value(&self) -> Option<String> {
        self.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Death date formatted for an HTML date control
    pub fn date_of_death_value(&self) -> Option<String> {
        self.date_of_death.map(|d| d.format("%Y-%m-%d").to_string())
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

/// Submitted author form fields (create and update).
/// Scalar fields arrive as text and are parsed by the validation pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

/// Composite view for author detail and delete confirmation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

/// A rejected author submission: sanitized values plus field errors
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RejectedAuthorForm {
    pub values: AuthorForm,
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            id: 7,
            first_name: "Patrick".to_string(),
            family_name: "Rothfuss".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1973, 6, 6),
            date_of_death: None,
        }
    }

    #[test]
    fn name_puts_family_name_first() {
        assert_eq!(author().name(), "Rothfuss, Patrick");
    }

    #[test]
    fn lifespan_leaves_missing_dates_blank() {
        assert_eq!(author().lifespan(), "June 6, 1973 - ");

        let unknown = Author {
            date_of_birth: None,
            ..author()
        };
        assert_eq!(unknown.lifespan(), " - ");
    }

    #[test]
    fn date_control_values_use_iso_format() {
        assert_eq!(author().date_of_birth_value().as_deref(), Some("1973-06-06"));
        assert_eq!(author().date_of_death_value(), None);
    }

    #[test]
    fn url_is_derived_from_id() {
        assert_eq!(author().url(), "/catalog/author/7");
    }
}
