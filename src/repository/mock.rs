//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::book::{BookDetail, BookSummary, NewBook};
use crate::domain::types::BookId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BookListQuery, BookReader, BookWriter};

mock! {
    pub Repository {}

    impl BookReader for Repository {
        fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<BookDetail>>;
        fn list_books(&self, query: BookListQuery) -> RepositoryResult<(usize, Vec<BookSummary>)>;
        fn random_books(&self, limit: usize) -> RepositoryResult<Vec<BookSummary>>;
    }

    impl BookWriter for Repository {
        fn create_books(&self, new_books: &[NewBook]) -> RepositoryResult<usize>;
    }
}
