//! Home summary service

use crate::{api::home::HomeSummary, error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct HomeService {
    repository: Repository,
}

impl HomeService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Counts of every entity kind plus available copies, fetched
    /// concurrently. Any failing sub-count aborts the whole composite.
    pub async fn summary(&self) -> AppResult<HomeSummary> {
        let (book_count, copy_count, available_copy_count, author_count, genre_count) = tokio::try_join!(
            self.repository.books.count(),
            self.repository.copies.count(),
            self.repository.copies.count_available(),
            self.repository.authors.count(),
            self.repository.genres.count(),
        )?;

        Ok(HomeSummary {
            book_count,
            copy_count,
            available_copy_count,
            author_count,
            genre_count,
        })
    }
}
