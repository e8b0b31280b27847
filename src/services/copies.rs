//! Copies service: listing with book references resolved, validated writes,
//! unconditional deletes

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        copy::{Copy, CopyDetail, CopyForm, CopyFull, CopyStatus, RejectedCopyForm},
    },
    repository::Repository,
    services::FormOutcome,
    validation::{parse_optional_date, sanitize, validate, FieldError, Rule},
};

const BOOK_RULES: &[Rule] = &[Rule::required("Book must be specified")];
const IMPRINT_RULES: &[Rule] = &[Rule::required("Imprint must be specified")];
const DUE_BACK_RULES: &[Rule] = &[Rule::optional_date("Invalid date")];

#[derive(Clone)]
pub struct CopiesService {
    repository: Repository,
}

impl CopiesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies with their book references resolved
    pub async fn list(&self) -> AppResult<Vec<CopyFull>> {
        let (copies, books) = tokio::try_join!(
            self.repository.copies.list(),
            self.repository.books.list_all(),
        )?;

        let by_id: HashMap<i32, _> = books.into_iter().map(|b| (b.id, b)).collect();
        Ok(copies
            .into_iter()
            .map(|c| {
                let book = by_id.get(&c.book_id).cloned();
                CopyFull::new(c, book)
            })
            .collect())
    }

    /// Copy with its book resolved, plus the full book list for the update
    /// form's selection control. NotFound when the copy id resolves to
    /// nothing.
    pub async fn detail(&self, id: i32) -> AppResult<CopyDetail> {
        let (copy, book_list) = tokio::try_join!(
            self.repository.copies.get_by_id(id),
            self.repository.books.list_all(),
        )?;

        let book = book_list.iter().find(|b| b.id == copy.book_id).cloned();
        Ok(CopyDetail {
            copy: CopyFull::new(copy, book),
            book_list,
        })
    }

    /// Book list backing the create form
    pub async fn create_form(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Validate and create a copy. Status defaults to Maintenance when the
    /// submitted label is empty or unrecognized.
    pub async fn create(&self, form: &CopyForm) -> AppResult<FormOutcome<Copy, RejectedCopyForm>> {
        let (values, errors) = Self::check(form);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(self.reject(values, errors).await?));
        }

        let book_id = values
            .book
            .ok_or_else(|| AppError::BadRequest("Book must be specified".to_string()))?;

        let copy = self
            .repository
            .copies
            .create(
                book_id,
                &values.imprint,
                CopyStatus::from_label(&values.status),
                parse_optional_date(&values.due_back),
            )
            .await?;
        Ok(FormOutcome::Saved(copy))
    }

    /// Validate and replace a copy record in full.
    /// NotFound when the id resolves to nothing; never inserts.
    pub async fn update(
        &self,
        id: i32,
        form: &CopyForm,
    ) -> AppResult<FormOutcome<Copy, RejectedCopyForm>> {
        let (values, errors) = Self::check(form);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(self.reject(values, errors).await?));
        }

        let book_id = values
            .book
            .ok_or_else(|| AppError::BadRequest("Book must be specified".to_string()))?;

        let copy = self
            .repository
            .copies
            .update(
                id,
                book_id,
                &values.imprint,
                CopyStatus::from_label(&values.status),
                parse_optional_date(&values.due_back),
            )
            .await?;
        Ok(FormOutcome::Saved(copy))
    }

    /// Delete a copy. Nothing references copies, so this is unconditional,
    /// and deleting an absent id is a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.copies.delete(id).await
    }

    async fn reject(
        &self,
        values: CopyForm,
        errors: Vec<FieldError>,
    ) -> AppResult<RejectedCopyForm> {
        let book_list = self.repository.books.list_all().await?;
        Ok(RejectedCopyForm {
            values,
            errors,
            book_list,
        })
    }

    fn check(form: &CopyForm) -> (CopyForm, Vec<FieldError>) {
        let book_text = form.book.map(|id| id.to_string()).unwrap_or_default();
        let errors = validate(&[
            ("book", &book_text, BOOK_RULES),
            ("imprint", &form.imprint, IMPRINT_RULES),
            ("due_back", &form.due_back, DUE_BACK_RULES),
        ]);

        let values = CopyForm {
            book: form.book,
            imprint: sanitize(&form.imprint),
            status: sanitize(&form.status),
            due_back: form.due_back.trim().to_string(),
        };

        (values, errors)
    }
}
