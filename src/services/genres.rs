//! Genres service, including create-or-reuse by name

use crate::{
    error::AppResult,
    models::genre::{Genre, GenreDetail, GenreForm, RejectedGenreForm},
    repository::Repository,
    services::{DeleteOutcome, FormOutcome},
    validation::{sanitize, validate, FieldError, Rule},
};

const NAME_RULES: &[Rule] = &[Rule::required("Genre name required")];

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All genres, name ascending
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    /// Genre plus all books tagged with it, fetched concurrently.
    /// NotFound when the genre id resolves to nothing.
    pub async fn detail(&self, id: i32) -> AppResult<GenreDetail> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.get_by_id(id),
            self.repository.books.find_by_genre(id),
        )?;
        Ok(GenreDetail { genre, books })
    }

    /// Same composite as `detail`, used for the delete confirmation view
    pub async fn delete_view(&self, id: i32) -> AppResult<GenreDetail> {
        self.detail(id).await
    }

    /// The current record, backing the update form.
    /// NotFound when the id resolves to nothing.
    pub async fn update_form(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    /// Validate and create a genre, reusing an existing record on an exact
    /// name match.
    ///
    /// The reuse path is a deduplicating upsert, not an error: both the first
    /// and second submission of the same name succeed and yield the same
    /// record identity. Concurrent creates of the same name may race; the
    /// last write establishes the canonical record.
    pub async fn create(
        &self,
        form: &GenreForm,
    ) -> AppResult<FormOutcome<Genre, RejectedGenreForm>> {
        let (values, errors) = Self::check(form);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(RejectedGenreForm { values, errors }));
        }

        if let Some(existing) = self.repository.genres.find_by_name(&values.name).await? {
            return Ok(FormOutcome::Saved(existing));
        }

        let genre = self.repository.genres.create(&values.name).await?;
        Ok(FormOutcome::Saved(genre))
    }

    /// Validate and replace a genre record. NotFound when the id resolves to
    /// nothing; no dedup on update.
    pub async fn update(
        &self,
        id: i32,
        form: &GenreForm,
    ) -> AppResult<FormOutcome<Genre, RejectedGenreForm>> {
        let (values, errors) = Self::check(form);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(RejectedGenreForm { values, errors }));
        }

        let genre = self.repository.genres.update(id, &values.name).await?;
        Ok(FormOutcome::Saved(genre))
    }

    /// Delete a genre unless books still reference it.
    ///
    /// Deleting an id that does not exist commits as a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<GenreDetail>> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.find_by_genre(id),
        )?;

        let genre = match genre {
            Some(genre) => genre,
            None => return Ok(DeleteOutcome::Committed),
        };

        if !books.is_empty() {
            return Ok(DeleteOutcome::Blocked(GenreDetail { genre, books }));
        }

        self.repository.genres.delete(id).await?;
        Ok(DeleteOutcome::Committed)
    }

    fn check(form: &GenreForm) -> (GenreForm, Vec<FieldError>) {
        let errors = validate(&[("name", &form.name, NAME_RULES)]);
        let values = GenreForm {
            name: sanitize(&form.name),
        };
        (values, errors)
    }
}
