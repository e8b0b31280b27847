//! API handlers for Folio REST endpoints

pub mod authors;
pub mod books;
pub mod copies;
pub mod genres;
pub mod health;
pub mod home;
pub mod openapi;
