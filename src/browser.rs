//! Catalog browser: query state machine and the declarative view it renders.
//!
//! The browser cycles `Idle -> Loading -> Rendered` and goes back to
//! `Loading` on every user event. Responses are never sequenced against each
//! other; whichever request resolves last determines what a caller renders.

use serde::Serialize;

use crate::client::{CatalogApi, CatalogPage, fetch_catalog_page};
use crate::domain::book::BookSummary;
use crate::domain::query::{BrowserEvent, QueryState};
use crate::domain::types::ALLOWED_PAGE_SIZES;
use crate::pagination::PaginationBar;

/// Cover shown for books without an image.
pub const PLACEHOLDER_COVER: &str = "images/placeholders/cover-default.jpg";

/// Characters of the description kept on a card.
pub const EXCERPT_LENGTH: usize = 90;

/// Sort choices offered by the home view as `(selection, label)`.
pub const SORT_OPTIONS: [(&str, &str); 6] = [
    ("id|desc", "Newest first"),
    ("id|asc", "Oldest first"),
    ("title|asc", "Title A–Z"),
    ("title|desc", "Title Z–A"),
    ("author|asc", "Author A–Z"),
    ("author|desc", "Author Z–A"),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Rendered,
}

/// A catalog card.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct BookCard {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub excerpt: String,
    pub cover_url: String,
    pub read_url: String,
    pub pdf_url: String,
}

impl From<&BookSummary> for BookCard {
    fn from(book: &BookSummary) -> Self {
        let description = book.description.as_deref().unwrap_or_default();
        let mut excerpt: String = description.chars().take(EXCERPT_LENGTH).collect();
        if description.chars().count() > EXCERPT_LENGTH {
            excerpt.push('…');
        }

        let cover_url = book
            .cover_image_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .unwrap_or(PLACEHOLDER_COVER)
            .to_string();

        Self {
            id: book.id.get(),
            title: book.title.clone(),
            author: book.author.clone().unwrap_or_default(),
            excerpt,
            cover_url,
            read_url: format!("/book?id={}", book.id),
            pdf_url: book.document_path.clone(),
        }
    }
}

pub fn render_cards(books: &[BookSummary]) -> Vec<BookCard> {
    books.iter().map(BookCard::from).collect()
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Everything the home template needs for the catalog section.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CatalogView {
    pub query: String,
    pub cards: Vec<BookCard>,
    pub pagination: PaginationBar,
    /// `Showing n of total results for “q”.` when a filter is active.
    pub search_meta: Option<String>,
    pub sort_options: Vec<SelectOption>,
    pub page_size_options: Vec<SelectOption>,
}

impl CatalogView {
    /// Pure mapping from the query state and a fetched page to the view.
    pub fn render(state: &QueryState, page: &CatalogPage) -> Self {
        let pagination = PaginationBar::new(page.total, state.page, state.page_size.get()).bind(
            |target| match state.apply(&BrowserEvent::PageJumped(target)).location() {
                Ok(location) => Some(location),
                Err(err) => {
                    log::error!("Failed to build link for page {target}: {err}");
                    None
                }
            },
        );

        let search_meta = (!state.text_filter.is_empty()).then(|| {
            format!(
                "Showing {} of {} results for “{}”.",
                page.items.len(),
                page.total,
                state.text_filter
            )
        });

        let current_sort = state.sort_selection();
        let sort_options = SORT_OPTIONS
            .iter()
            .map(|(value, label)| SelectOption {
                value: value.to_string(),
                label: label.to_string(),
                selected: *value == current_sort,
            })
            .collect();

        let page_size_options = ALLOWED_PAGE_SIZES
            .iter()
            .map(|size| SelectOption {
                value: size.to_string(),
                label: format!("{size} per page"),
                selected: *size == state.page_size.get(),
            })
            .collect();

        Self {
            query: state.text_filter.clone(),
            cards: render_cards(&page.items),
            pagination,
            search_meta,
            sort_options,
            page_size_options,
        }
    }
}

/// Owns the query state of one home view and drives its fetch/render cycle.
#[derive(Debug, Default)]
pub struct CatalogBrowser {
    state: QueryState,
    phase: Phase,
    issued: u64,
}

impl CatalogBrowser {
    pub fn new(state: QueryState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Rebuilds the state a page address describes by replaying its events.
    pub fn restore<I>(events: I) -> Self
    where
        I: IntoIterator<Item = BrowserEvent>,
    {
        let state = events
            .into_iter()
            .fold(QueryState::default(), |state, event| state.apply(&event));
        Self::new(state)
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of search requests issued so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Applies `event` and loads the resulting page.
    pub async fn dispatch<C>(&mut self, api: &C, event: BrowserEvent) -> CatalogView
    where
        C: CatalogApi,
    {
        self.state = self.state.apply(&event);
        self.load(api).await
    }

    /// Fetches the current state and renders it. Failures render as empty.
    pub async fn load<C>(&mut self, api: &C) -> CatalogView
    where
        C: CatalogApi,
    {
        self.phase = Phase::Loading;
        self.issued += 1;
        let sequence = self.issued;
        log::debug!(
            "Catalog request #{sequence}: q={:?} sort={} page={} page_size={}",
            self.state.text_filter,
            self.state.sort_selection(),
            self.state.page,
            self.state.page_size
        );

        let page = fetch_catalog_page(api, &self.state).await;
        let view = CatalogView::render(&self.state, &page);

        log::debug!(
            "Catalog request #{sequence} rendered {} of {} books",
            page.items.len(),
            page.total
        );
        self.phase = Phase::Rendered;
        view
    }
}
