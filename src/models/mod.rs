//! Data models for Folio

pub mod author;
pub mod book;
pub mod copy;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorDetail, AuthorForm, RejectedAuthorForm};
pub use book::{
    Book, BookDetail, BookForm, BookFormData, BookFull, BookListEntry, BookUpdateForm,
    RejectedBookForm,
};
pub use copy::{Copy, CopyDetail, CopyForm, CopyFull, CopyStatus, RejectedCopyForm};
pub use genre::{Genre, GenreDetail, GenreForm, GenreOption, RejectedGenreForm};
