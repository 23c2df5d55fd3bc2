//! Wire types of the `/api/books` endpoints.

use serde::Serialize;

use crate::domain::book::BookSummary;
use crate::domain::types::SortOrder;

/// Query parameters accepted by [`crate::services::api::list_books`].
///
/// Numeric fields are already parsed; unparseable input arrives as `None`.
#[derive(Debug, Default)]
pub struct BooksQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Payload of `GET /api/books`.
#[derive(Debug, Serialize)]
pub struct BooksResponse {
    /// Number of books matching the filter across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    /// Effective sort column after whitelisting.
    pub sort: &'static str,
    pub order: SortOrder,
    pub items: Vec<BookSummary>,
}

/// Payload of `GET /api/books/random`.
#[derive(Debug, Serialize)]
pub struct RandomBooksResponse {
    pub items: Vec<BookSummary>,
}
