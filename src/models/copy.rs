//! Copy (physical book instance) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::book::Book;
use crate::validation::FieldError;

/// Loan status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum CopyStatus {
    Maintenance = 0,
    Available = 1,
    Loaned = 2,
    Reserved = 3,
}

impl CopyStatus {
    /// Parse a submitted status label; anything unrecognized falls back to
    /// the default.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Available" => CopyStatus::Available,
            "Loaned" => CopyStatus::Loaned,
            "Reserved" => CopyStatus::Reserved,
            _ => CopyStatus::Maintenance,
        }
    }
}

impl From<i16> for CopyStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => CopyStatus::Available,
            2 => CopyStatus::Loaned,
            3 => CopyStatus::Reserved,
            _ => CopyStatus::Maintenance,
        }
    }
}

impl From<CopyStatus> for i16 {
    fn from(s: CopyStatus) -> Self {
        s as i16
    }
}

impl Default for CopyStatus {
    fn default() -> Self {
        CopyStatus::Maintenance
    }
}

impl std::fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::Available => "Available",
            CopyStatus::Loaned => "Loaned",
            CopyStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

/// Full copy record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Copy {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    /// Status code, see [`CopyStatus`]
    pub status: i16,
    pub due_back: Option<NaiveDate>,
}

impl Copy {
    pub fn status(&self) -> CopyStatus {
        CopyStatus::from(self.status)
    }

    /// Due date formatted for an HTML date control
    pub fn due_back_value(&self) -> Option<String> {
        self.due_back.map(|d| d.format("%Y-%m-%d").to_string())
    }

    pub fn url(&self) -> String {
        format!("/catalog/copy/{}", self.id)
    }
}

/// Copy with its book reference resolved.
/// The book may be absent when the stored reference no longer resolves.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CopyFull {
    pub id: i32,
    pub imprint: String,
    pub status: i16,
    pub due_back: Option<NaiveDate>,
    pub book: Option<Book>,
}

impl CopyFull {
    pub fn new(copy: Copy, book: Option<Book>) -> Self {
        Self {
            id: copy.id,
            imprint: copy.imprint,
            status: copy.status,
            due_back: copy.due_back,
            book,
        }
    }
}

/// Submitted copy form fields (create and update)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CopyForm {
    #[serde(default)]
    pub book: Option<i32>,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

/// Composite view for copy detail and update form: the copy with its book
/// resolved, plus the full book list for the selection control
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CopyDetail {
    pub copy: CopyFull,
    pub book_list: Vec<Book>,
}

/// A rejected copy submission: sanitized values, field errors, and the book
/// list needed to re-present the form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RejectedCopyForm {
    pub values: CopyForm,
    pub errors: Vec<FieldError>,
    pub book_list: Vec<Book>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_maintenance() {
        assert_eq!(CopyStatus::default(), CopyStatus::Maintenance);
        assert_eq!(CopyStatus::from_label(""), CopyStatus::Maintenance);
        assert_eq!(CopyStatus::from_label("Lost"), CopyStatus::Maintenance);
    }

    #[test]
    fn status_round_trips_through_codes() {
        for status in [
            CopyStatus::Maintenance,
            CopyStatus::Available,
            CopyStatus::Loaned,
            CopyStatus::Reserved,
        ] {
            assert_eq!(CopyStatus::from(i16::from(status)), status);
        }
        // Unknown codes collapse to the default.
        assert_eq!(CopyStatus::from(42), CopyStatus::Maintenance);
    }

    #[test]
    fn labels_parse_back_to_their_status() {
        for status in [CopyStatus::Available, CopyStatus::Loaned, CopyStatus::Reserved] {
            assert_eq!(CopyStatus::from_label(&status.to_string()), status);
        }
    }
}
