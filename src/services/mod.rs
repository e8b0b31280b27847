//! Business logic services

pub mod authors;
pub mod books;
pub mod copies;
pub mod genres;
pub mod home;

use crate::repository::Repository;

/// Outcome of a validated create or update.
///
/// A rejected submission is not an error: the caller gets the sanitized
/// values and field errors back so the form can be re-presented pre-filled.
#[derive(Debug)]
pub enum FormOutcome<T, R> {
    Saved(T),
    Invalid(R),
}

/// Outcome of a reference-gated delete.
///
/// `Blocked` carries the same composite view used for display, so the caller
/// can show the dependents that must be removed first.
#[derive(Debug)]
pub enum DeleteOutcome<V> {
    Committed,
    Blocked(V),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub copies: copies::CopiesService,
    pub home: home::HomeService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            copies: copies::CopiesService::new(repository.clone()),
            home: home::HomeService::new(repository.clone()),
            repository,
        }
    }
}
