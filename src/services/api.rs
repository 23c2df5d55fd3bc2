use crate::domain::book::BookDetail;
use crate::domain::types::{BookId, SortOrder};
use crate::dto::api::{BooksQuery, BooksResponse, RandomBooksResponse};
use crate::repository::{BookListQuery, BookReader, SortColumn};
use crate::services::{ServiceError, ServiceResult};

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 48;
pub const DEFAULT_RANDOM_LIMIT: usize = 8;
pub const MAX_RANDOM_LIMIT: usize = 24;

fn clamp_param(value: Option<i64>, default: usize, max: usize) -> usize {
    value.map_or(default, |v| v.clamp(1, max as i64) as usize)
}

/// Searches, sorts and paginates the catalog.
pub fn list_books<R>(repo: &R, params: BooksQuery) -> ServiceResult<BooksResponse>
where
    R: BookReader + ?Sized,
{
    let page = params.page.map_or(1, |p| p.max(1) as usize);
    let page_size = clamp_param(params.page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let sort = params
        .sort
        .as_deref()
        .map_or(SortColumn::Title, SortColumn::from_token);
    let order = match params.order.as_deref().map(str::parse::<SortOrder>) {
        Some(Ok(SortOrder::Desc)) => SortOrder::Desc,
        _ => SortOrder::Asc,
    };

    let mut query = BookListQuery::new()
        .sort(sort, order)
        .paginate(page, page_size);

    if let Some(term) = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }

    let (total, items) = repo.list_books(query)?;

    Ok(BooksResponse {
        total,
        page,
        page_size,
        sort: sort.as_str(),
        order,
        items,
    })
}

/// Picks up to `limit` random books for the popular shelf.
pub fn random_books<R>(repo: &R, limit: Option<i64>) -> ServiceResult<RandomBooksResponse>
where
    R: BookReader + ?Sized,
{
    let limit = clamp_param(limit, DEFAULT_RANDOM_LIMIT, MAX_RANDOM_LIMIT);
    let items = repo.random_books(limit)?;
    Ok(RandomBooksResponse { items })
}

pub fn get_book<R>(repo: &R, book_id: i32) -> ServiceResult<BookDetail>
where
    R: BookReader + ?Sized,
{
    let book_id = BookId::new(book_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_book_by_id(book_id)?.ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::book::BookSummary;
    use crate::repository::Pagination;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn summary(id: i32) -> BookSummary {
        BookSummary {
            id: BookId::new(id).unwrap(),
            title: format!("Title {id}"),
            author: None,
            description: None,
            cover_image_path: None,
            document_path: format!("pdfs/{id}.pdf"),
        }
    }

    #[test]
    fn defaults_match_catalog_contract() {
        let mut repo = MockRepository::new();
        repo.expect_list_books()
            .withf(|query| {
                query.search.is_none()
                    && query.sort == SortColumn::Title
                    && query.order == SortOrder::Asc
                    && query.pagination == Some(Pagination { page: 1, per_page: 12 })
            })
            .returning(|_| Ok((30, vec![summary(1)])));

        let response = list_books(&repo, BooksQuery::default()).unwrap();
        assert_eq!(response.total, 30);
        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, 12);
        assert_eq!(response.sort, "title");
        assert_eq!(response.order, SortOrder::Asc);
    }

    #[test]
    fn parameters_are_clamped_and_whitelisted() {
        let mut repo = MockRepository::new();
        repo.expect_list_books()
            .withf(|query| {
                query.search.as_deref() == Some("dune")
                    && query.sort == SortColumn::Title
                    && query.order == SortOrder::Desc
                    && query.pagination == Some(Pagination { page: 1, per_page: 48 })
            })
            .returning(|_| Ok((0, vec![])));

        let response = list_books(
            &repo,
            BooksQuery {
                search: Some("  dune ".to_string()),
                sort: Some("rating".to_string()),
                order: Some("DESC".to_string()),
                page: Some(-4),
                page_size: Some(100),
            },
        )
        .unwrap();
        assert_eq!(response.page_size, 48);
        assert_eq!(response.sort, "title");
    }

    #[test]
    fn zero_page_size_becomes_one() {
        let mut repo = MockRepository::new();
        repo.expect_list_books()
            .withf(|query| query.pagination.map(|p| p.per_page) == Some(1))
            .returning(|_| Ok((0, vec![])));

        let params = BooksQuery {
            page_size: Some(0),
            ..BooksQuery::default()
        };
        assert_eq!(list_books(&repo, params).unwrap().page_size, 1);
    }

    #[test]
    fn largest_page_is_passed_through_and_echoed() {
        let mut repo = MockRepository::new();
        repo.expect_list_books()
            .withf(|query| {
                query.pagination
                    == Some(Pagination {
                        page: i64::MAX as usize,
                        per_page: 48,
                    })
            })
            .returning(|_| Ok((30, vec![])));

        let params = BooksQuery {
            page: Some(i64::MAX),
            page_size: Some(48),
            ..BooksQuery::default()
        };
        let response = list_books(&repo, params).unwrap();
        assert_eq!(response.total, 30);
        assert_eq!(response.page, i64::MAX as usize);
        assert!(response.items.is_empty());
    }

    #[test]
    fn random_limit_is_clamped() {
        let mut repo = MockRepository::new();
        repo.expect_random_books()
            .with(eq(24))
            .returning(|limit| Ok((1..=limit as i32).map(summary).collect()));
        repo.expect_random_books()
            .with(eq(8))
            .returning(|_| Ok(vec![]));

        assert_eq!(random_books(&repo, Some(500)).unwrap().items.len(), 24);
        assert!(random_books(&repo, None).unwrap().items.is_empty());
    }

    #[test]
    fn missing_book_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_book_by_id().returning(|_| Ok(None));

        assert!(matches!(get_book(&repo, 7), Err(ServiceError::NotFound)));
        assert!(matches!(get_book(&repo, 0), Err(ServiceError::NotFound)));
    }

    #[test]
    fn repository_failure_propagates() {
        let mut repo = MockRepository::new();
        repo.expect_get_book_by_id()
            .returning(|_| Err(RepositoryError::ConnectionError("pool timed out".into())));

        assert!(matches!(
            get_book(&repo, 3),
            Err(ServiceError::Repository(_))
        ));
    }
}
