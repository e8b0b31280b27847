//! Authors service: listing, composite reads, validated writes and
//! reference-gated deletes

use crate::{
    error::AppResult,
    models::author::{Author, AuthorDetail, AuthorForm, RejectedAuthorForm},
    repository::Repository,
    services::{DeleteOutcome, FormOutcome},
    validation::{parse_optional_date, sanitize, validate, FieldError, Rule},
};

const FIRST_NAME_RULES: &[Rule] = &[
    Rule::required_max(100, "First name must be specified."),
    Rule::alphabetic("First name has non alphanumeric characters."),
];
const FAMILY_NAME_RULES: &[Rule] = &[
    Rule::required_max(100, "Family name must be specified."),
    Rule::alphabetic("Family name has non alphanumeric characters."),
];
const BIRTH_RULES: &[Rule] = &[Rule::optional_date("Invalid date of birth")];
const DEATH_RULES: &[Rule] = &[Rule::optional_date("Invalid date of death")];

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All authors, family name ascending
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Author plus all books referencing them, fetched concurrently.
    /// NotFound when the author id resolves to nothing.
    pub async fn detail(&self, id: i32) -> AppResult<AuthorDetail> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.get_by_id(id),
            self.repository.books.find_by_author(id),
        )?;
        Ok(AuthorDetail { author, books })
    }

    /// Same composite as `detail`, used for the delete confirmation view
    pub async fn delete_view(&self, id: i32) -> AppResult<AuthorDetail> {
        self.detail(id).await
    }

    /// The current record, backing the update form.
    /// NotFound when the id resolves to nothing.
    pub async fn update_form(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Validate and create an author
    pub async fn create(
        &self,
        form: &AuthorForm,
    ) -> AppResult<FormOutcome<Author, RejectedAuthorForm>> {
        let (values, errors) = Self::check(form);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(RejectedAuthorForm { values, errors }));
        }

        let author = self
            .repository
            .authors
            .create(
                &values.first_name,
                &values.family_name,
                parse_optional_date(&values.date_of_birth),
                parse_optional_date(&values.date_of_death),
            )
            .await?;
        Ok(FormOutcome::Saved(author))
    }

    /// Validate and replace an author record in full.
    /// NotFound when the id resolves to nothing; never inserts.
    pub async fn update(
        &self,
        id: i32,
        form: &AuthorForm,
    ) -> AppResult<FormOutcome<Author, RejectedAuthorForm>> {
        let (values, errors) = Self::check(form);
        if !errors.is_empty() {
            return Ok(FormOutcome::Invalid(RejectedAuthorForm { values, errors }));
        }

        let author = self
            .repository
            .authors
            .update(
                id,
                &values.first_name,
                &values.family_name,
                parse_optional_date(&values.date_of_birth),
                parse_optional_date(&values.date_of_death),
            )
            .await?;
        Ok(FormOutcome::Saved(author))
    }

    /// Delete an author unless books still reference them.
    ///
    /// Deleting an id that does not exist commits as a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<AuthorDetail>> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.find_by_author(id),
        )?;

        let author = match author {
            Some(author) => author,
            None => return Ok(DeleteOutcome::Committed),
        };

        if !books.is_empty() {
            return Ok(DeleteOutcome::Blocked(AuthorDetail { author, books }));
        }

        self.repository.authors.delete(id).await?;
        Ok(DeleteOutcome::Committed)
    }

    /// Run the rule table and sanitize the submission for storage or
    /// re-presentation
    fn check(form: &AuthorForm) -> (AuthorForm, Vec<FieldError>) {
        let errors = validate(&[
            ("first_name", &form.first_name, FIRST_NAME_RULES),
            ("family_name", &form.family_name, FAMILY_NAME_RULES),
            ("date_of_birth", &form.date_of_birth, BIRTH_RULES),
            ("date_of_death", &form.date_of_death, DEATH_RULES),
        ]);

        let values = AuthorForm {
            first_name: sanitize(&form.first_name),
            family_name: sanitize(&form.family_name),
            date_of_birth: form.date_of_birth.trim().to_string(),
            date_of_death: form.date_of_death.trim().to_string(),
        };

        (values, errors)
    }
}
