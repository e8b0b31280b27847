//! Books service: composite reads resolving author and genre references,
//! validated writes with genre-set coercion, and copy-gated deletes

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{
            Book, BookDetail, BookForm, BookFormData, BookFull, BookListEntry, BookUpdateForm,
            RejectedBookForm,
        },
        genre::GenreOption,
    },
    repository::Repository,
    services::{DeleteOutcome, FormOutcome},
    validation::{sanitize, validate, FieldError, Rule},
};

const TITLE_RULES: &[Rule] = &[Rule::required("Title must not be empty")];
const AUTHOR_RULES: &[Rule] = &[Rule::required("Author must not be empty")];
const SUMMARY_RULES: &[Rule] = &[Rule::required("Summary must not be empty")];
const ISBN_RULES: &[Rule] = &[Rule::required("ISBN must not be empty")];

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books with author names resolved, title ascending
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        self.repository.books.list().await
    }

    /// Book with author and genres resolved, plus its copies, fetched
    /// concurrently. NotFound when the book id resolves to nothing.
    pub async fn detail(&self, id: i32) -> AppResult<BookDetail> {
        let (book, genres, copies) = tokio::try_join!(
            self.repository.books.get_by_id(id),
            self.repository.books.genres_for(id),
            self.repository.copies.find_by_book(id),
        )?;

        let author = self.repository.authors.find_by_id(book.author_id).await?;

        Ok(BookDetail {
            book: BookFull {
                id: book.id,
                title: book.title,
                summary: book.summary,
                isbn: book.isbn,
                author,
                genres,
            },
            copies,
        })
    }

    /// Same composite as `detail`, used for the delete confirmation view
    pub async fn delete_view(&self, id: i32) -> AppResult<BookDetail> {
        self.detail(id).await
    }

    /// Author and genre lists backing the create form
    pub async fn create_form(&self) -> AppResult<BookFormData> {
        self.form_data(&[]).await
    }

    /// The book plus the form lists, genres flagged with current associations
    pub async fn update_form(&self, id: i32) -> AppResult<BookUpdateForm> {
        let detail = self.detail(id).await?;
        let selected: Vec<i32> = detail.book.genres.iter().map(|g| g.id).collect();
        let form = self.form_data(&selected).await?;
        Ok(BookUpdateForm {
            book: detail.book,
            form,
        })
    }

    /// Validate and create a book with its genre link set
    pub async fn create(&self, form: &BookForm) -> AppResult<FormOutcome<Book, RejectedBookForm>> {
        let (values, errors) = Self::check(form);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(self.reject(values, errors).await?));
        }

        let author_id = values
            .author
            .ok_or_else(|| AppError::BadRequest("Author must not be empty".to_string()))?;

        let book = self
            .repository
            .books
            .create(
                &values.title,
                author_id,
                &values.summary,
                &values.isbn,
                &values.genre,
            )
            .await?;
        Ok(FormOutcome::Saved(book))
    }

    /// Validate and replace a book record in full, genre links included.
    /// NotFound when the id resolves to nothing; never inserts.
    pub async fn update(
        &self,
        id: i32,
        form: &BookForm,
    ) -> AppResult<FormOutcome<Book, RejectedBookForm>> {
        let (values, errors) = Self::check(form);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(self.reject(values, errors).await?));
        }

        let author_id = values
            .author
            .ok_or_else(|| AppError::BadRequest("Author must not be empty".to_string()))?;

        let book = self
            .repository
            .books
            .update(
                id,
                &values.title,
                author_id,
                &values.summary,
                &values.isbn,
                &values.genre,
            )
            .await?;
        Ok(FormOutcome::Saved(book))
    }

    /// Delete a book unless copies still reference it.
    ///
    /// Deleting an id that does not exist commits as a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<BookDetail>> {
        let (book, copies) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.repository.copies.find_by_book(id),
        )?;

        if book.is_none() {
            return Ok(DeleteOutcome::Committed);
        }

        if !copies.is_empty() {
            return Ok(DeleteOutcome::Blocked(self.detail(id).await?));
        }

        self.repository.books.delete(id).await?;
        Ok(DeleteOutcome::Committed)
    }

    /// Author and genre lists, flagging the given genre ids as selected
    async fn form_data(&self, selected: &[i32]) -> AppResult<BookFormData> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;

        let genres = genres
            .into_iter()
            .map(|g| GenreOption {
                checked: selected.contains(&g.id),
                id: g.id,
                name: g.name,
            })
            .collect();

        Ok(BookFormData { authors, genres })
    }

    /// Build the invalid outcome: sanitized values, errors, and the form
    /// lists with the submitted genres pre-selected
    async fn reject(
        &self,
        values: BookForm,
        errors: Vec<FieldError>,
    ) -> AppResult<RejectedBookForm> {
        let form = self.form_data(&values.genre).await?;
        Ok(RejectedBookForm {
            values,
            errors,
            form,
        })
    }

    fn check(form: &BookForm) -> (BookForm, Vec<FieldError>) {
        let author_text = form.author.map(|id| id.to_string()).unwrap_or_default();
        let errors = validate(&[
            ("title", &form.title, TITLE_RULES),
            ("author", &author_text, AUTHOR_RULES),
            ("summary", &form.summary, SUMMARY_RULES),
            ("isbn", &form.isbn, ISBN_RULES),
        ]);

        let values = BookForm {
            title: sanitize(&form.title),
            author: form.author,
            summary: sanitize(&form.summary),
            isbn: sanitize(&form.isbn),
            genre: form.genre.clone(),
        };

        (values, errors)
    }
}
