use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::sqlite::Sqlite;

use crate::domain::book::{BookDetail, BookSummary, NewBook};
use crate::domain::types::{BookId, SortOrder};
use crate::models::book::{Book as DbBook, NewBook as DbNewBook};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BookListQuery, BookReader, BookWriter, DieselRepository, SortColumn};
use crate::schema::books;

/// Books whose title, author or description contain `search`.
fn matching(search: Option<&str>) -> books::BoxedQuery<'static, Sqlite> {
    let mut query = books::table.into_boxed();
    if let Some(term) = search {
        let pattern = format!("%{term}%");
        query = query.filter(
            books::title
                .like(pattern.clone())
                .or(books::author.like(pattern.clone()))
                .or(books::description.like(pattern)),
        );
    }
    query
}

fn into_summaries(rows: Vec<DbBook>) -> RepositoryResult<Vec<BookSummary>> {
    rows.into_iter()
        .map(|row| BookSummary::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl BookReader for DieselRepository {
    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<BookDetail>> {
        let mut conn = self.conn()?;
        let book = books::table
            .find(id.get())
            .select(DbBook::as_select())
            .first::<DbBook>(&mut conn)
            .optional()?;

        book.map(BookDetail::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_books(&self, query: BookListQuery) -> RepositoryResult<(usize, Vec<BookSummary>)> {
        let mut conn = self.conn()?;
        let search = query.search.as_deref().filter(|s| !s.is_empty());

        let total: i64 = matching(search).count().get_result(&mut conn)?;

        let mut items = matching(search).select(DbBook::as_select());
        items = match (query.sort, query.order) {
            (SortColumn::Id, SortOrder::Asc) => items.order(books::id.asc()),
            (SortColumn::Id, SortOrder::Desc) => items.order(books::id.desc()),
            (SortColumn::Title, SortOrder::Asc) => items.order(books::title.asc()),
            (SortColumn::Title, SortOrder::Desc) => items.order(books::title.desc()),
            (SortColumn::Author, SortOrder::Asc) => items.order(books::author.asc()),
            (SortColumn::Author, SortOrder::Desc) => items.order(books::author.desc()),
        };

        if let Some(pagination) = &query.pagination {
            // SQLite takes signed bounds; anything past i64::MAX is past the end anyway.
            items = items
                .limit(i64::try_from(pagination.per_page).unwrap_or(i64::MAX))
                .offset(i64::try_from(pagination.offset()).unwrap_or(i64::MAX));
        }

        let rows = items.load::<DbBook>(&mut conn)?;

        Ok((total as usize, into_summaries(rows)?))
    }

    fn random_books(&self, limit: usize) -> RepositoryResult<Vec<BookSummary>> {
        let mut conn = self.conn()?;
        let rows = books::table
            .select(DbBook::as_select())
            .order(sql::<Integer>("RANDOM()"))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .load::<DbBook>(&mut conn)?;

        into_summaries(rows)
    }
}

impl BookWriter for DieselRepository {
    fn create_books(&self, new_books: &[NewBook]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let insertables: Vec<DbNewBook> = new_books.iter().map(Into::into).collect();

        let affected = diesel::insert_into(books::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
