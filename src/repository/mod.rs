use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::book::{BookDetail, BookSummary, NewBook};
use crate::domain::types::{BookId, SortOrder};
use crate::repository::errors::RepositoryResult;

pub mod book;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows skipped before this page. Saturates instead of overflowing.
    pub fn offset(&self) -> usize {
        self.page.max(1).saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Columns the catalog may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    #[default]
    Title,
    Author,
}

impl SortColumn {
    /// Maps a client sort token onto a column, falling back to the title.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "id" => SortColumn::Id,
            "author" => SortColumn::Author,
            _ => SortColumn::Title,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Title => "title",
            SortColumn::Author => "author",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookListQuery {
    pub search: Option<String>,
    pub sort: SortColumn,
    pub order: SortOrder,
    pub pagination: Option<Pagination>,
}

impl BookListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, column: SortColumn, order: SortOrder) -> Self {
        self.sort = column;
        self.order = order;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait BookReader {
    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<BookDetail>>;
    /// Returns the total number of matching books together with the requested page.
    fn list_books(&self, query: BookListQuery) -> RepositoryResult<(usize, Vec<BookSummary>)>;
    fn random_books(&self, limit: usize) -> RepositoryResult<Vec<BookSummary>>;
}

/// Bulk loading of catalog entries, used to seed a catalog database.
pub trait BookWriter {
    fn create_books(&self, new_books: &[NewBook]) -> RepositoryResult<usize>;
}

/// Diesel-backed implementation of every catalog repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
