use crate::browser::{CatalogBrowser, render_cards};
use crate::client::{CatalogApi, fetch_popular};
use crate::domain::query::BrowserEvent;
use crate::dto::main::{IndexPageData, IndexQuery};

/// Books shown on the popular shelf.
pub const POPULAR_SHELF_SIZE: usize = 8;

/// Turns the home view address into the events that lead to it.
///
/// Search, sort and page size each reset the page, so an explicit page is
/// replayed last.
pub fn index_events(query: IndexQuery) -> Vec<BrowserEvent> {
    let mut events = Vec::with_capacity(4);
    if let Some(search) = query.search {
        events.push(BrowserEvent::SearchSubmitted(search));
    }
    if let Some(sort) = query.sort {
        events.push(BrowserEvent::SortChanged(sort));
    }
    if let Some(page_size) = query.page_size {
        events.push(BrowserEvent::PageSizeChanged(page_size));
    }
    if let Some(page) = query.page {
        events.push(BrowserEvent::PageJumped(page));
    }
    events
}

/// Loads the popular shelf and the catalog page the address asks for.
///
/// Never fails: unavailable data renders as empty sections.
pub async fn load_index_page<C>(api: &C, query: IndexQuery) -> IndexPageData
where
    C: CatalogApi,
{
    let popular = fetch_popular(api, POPULAR_SHELF_SIZE).await;
    let mut browser = CatalogBrowser::restore(index_events(query));
    let catalog = browser.load(api).await;

    IndexPageData {
        catalog,
        popular: render_cards(&popular),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeCatalog;

    #[test]
    fn explicit_page_survives_other_parameters() {
        let events = index_events(IndexQuery {
            search: Some("dune".into()),
            sort: Some("title|asc".into()),
            page_size: Some("12".into()),
            page: Some(3),
        });
        assert_eq!(events.last(), Some(&BrowserEvent::PageJumped(3)));
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn bare_address_has_no_events() {
        assert!(index_events(IndexQuery::default()).is_empty());
    }

    #[actix_web::test]
    async fn index_page_combines_shelf_and_catalog() {
        let api = FakeCatalog::with_books(40);
        let data = load_index_page(
            &api,
            IndexQuery {
                page: Some(2),
                ..IndexQuery::default()
            },
        )
        .await;

        assert_eq!(data.popular.len(), POPULAR_SHELF_SIZE);
        assert_eq!(data.catalog.cards.len(), 18);
        assert_eq!(data.catalog.pagination.summary, "Page 2 of 3 • 40 books");
    }

    #[actix_web::test]
    async fn unavailable_api_renders_empty_sections() {
        let data = load_index_page(&FakeCatalog::failing(), IndexQuery::default()).await;
        assert!(data.popular.is_empty());
        assert!(data.catalog.cards.is_empty());
        assert_eq!(data.catalog.pagination.summary, "Page 1 of 1 • 0 books");
    }
}
