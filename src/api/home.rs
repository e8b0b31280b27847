//! Home summary endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

/// Catalog-wide counts for the home view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomeSummary {
    pub book_count: i64,
    pub copy_count: i64,
    /// Copies with status Available
    pub available_copy_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

/// Counts of every entity kind plus currently available copies
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog summary", body = HomeSummary)
    )
)]
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<HomeSummary>> {
    let summary = state.services.home.summary().await?;
    Ok(Json(summary))
}
