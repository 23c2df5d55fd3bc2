//! Catalog browser query state and the reducer that advances it.
//!
//! A [`QueryState`] is never mutated in place: every user event produces the
//! next state through [`QueryState::apply`].

use serde::Serialize;

use crate::domain::types::{PageSize, SortKey, SortOrder};

/// Separator used by combined sort selections such as `title|asc`.
pub const SORT_SELECTION_SEPARATOR: char = '|';

/// Everything the catalog browser needs to issue a search request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
    pub text_filter: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub page: usize,
    pub page_size: PageSize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            text_filter: String::new(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::Desc,
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

/// User interactions understood by the catalog browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserEvent {
    /// Search form submitted with the raw input text.
    SearchSubmitted(String),
    /// Sort select changed to a combined `field|order` selection.
    SortChanged(String),
    /// Page-size select changed to the raw option value.
    PageSizeChanged(String),
    /// A pagination control was clicked.
    PageJumped(usize),
}

impl QueryState {
    /// Returns the state that follows `event`.
    ///
    /// Search, sort and page-size changes always go back to the first page.
    /// A jump only moves the page.
    #[must_use]
    pub fn apply(&self, event: &BrowserEvent) -> Self {
        let mut next = self.clone();
        match event {
            BrowserEvent::SearchSubmitted(text) => {
                next.text_filter = text.trim().to_string();
                next.page = 1;
            }
            BrowserEvent::SortChanged(selection) => {
                match parse_sort_selection(selection) {
                    Some((key, order)) => {
                        next.sort_key = key;
                        next.sort_order = order;
                    }
                    None => log::warn!("Ignoring malformed sort selection {selection:?}"),
                }
                next.page = 1;
            }
            BrowserEvent::PageSizeChanged(raw) => {
                match raw.parse::<PageSize>() {
                    Ok(size) => next.page_size = size,
                    Err(err) => log::warn!("Ignoring page size {raw:?}: {err}"),
                }
                next.page = 1;
            }
            BrowserEvent::PageJumped(target) => {
                next.page = (*target).max(1);
            }
        }
        next
    }

    /// Combined `field|order` token matching the sort select options.
    pub fn sort_selection(&self) -> String {
        format!(
            "{}{SORT_SELECTION_SEPARATOR}{}",
            self.sort_key, self.sort_order
        )
    }

    /// Parameters sent to the catalog search API.
    pub fn to_request(&self) -> CatalogRequest<'_> {
        CatalogRequest {
            q: &self.text_filter,
            sort: self.sort_key.as_str(),
            order: self.sort_order,
            page: self.page,
            page_size: self.page_size.get(),
        }
    }

    /// Address of the home view showing this state.
    pub fn location(&self) -> Result<String, serde_html_form::ser::Error> {
        let params = LocationParams {
            q: &self.text_filter,
            sort: self.sort_selection(),
            page_size: self.page_size.get(),
            page: self.page,
        };
        Ok(format!("/?{}", serde_html_form::to_string(&params)?))
    }
}

fn parse_sort_selection(selection: &str) -> Option<(SortKey, SortOrder)> {
    let (key, order) = selection.split_once(SORT_SELECTION_SEPARATOR)?;
    let key = SortKey::new(key).ok()?;
    let order = order.parse::<SortOrder>().ok()?;
    Some((key, order))
}

/// Query parameters of `GET /api/books`.
///
/// Every field is always serialized, an empty filter goes out as `q=`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CatalogRequest<'a> {
    pub q: &'a str,
    pub sort: &'a str,
    pub order: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

impl CatalogRequest<'_> {
    /// Flat `key=value` query string in a fixed parameter order.
    pub fn to_query_string(&self) -> Result<String, serde_html_form::ser::Error> {
        serde_html_form::to_string(self)
    }
}

#[derive(Serialize)]
struct LocationParams<'a> {
    q: &'a str,
    sort: String,
    page_size: usize,
    page: usize,
}
