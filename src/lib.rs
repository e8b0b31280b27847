//! Folio lending library catalog
//!
//! A REST JSON backend for a small lending library catalog: authors, genres,
//! books, and physical copies, with reference-gated deletes and
//! deduplicating genre creation.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
