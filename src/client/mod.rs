//! Consumer side of the catalog API.
//!
//! [`CatalogApi`] is the seam between the catalog browser and the network.
//! [`fetch_catalog_page`] and [`fetch_popular`] apply the fail-soft policy:
//! any failure degrades to an empty result instead of reaching the view.

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::book::{BookDetail, BookSummary};
use crate::domain::query::{CatalogRequest, QueryState};
use crate::domain::types::BookId;

pub mod http;

/// Errors raised while talking to the catalog API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("book not found")]
    NotFound,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not encode request: {0}")]
    Encode(#[from] serde_html_form::ser::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// One page of search results.
///
/// `total` counts matches across all pages, not `items.len()`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct CatalogPage {
    pub items: Vec<BookSummary>,
    pub total: usize,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub page_size: usize,
}

impl CatalogPage {
    /// Renderable result used when a search request fails.
    pub fn empty(page: usize, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            page_size,
        }
    }
}

#[derive(Deserialize)]
struct PopularPayload {
    #[serde(default)]
    items: Vec<BookSummary>,
}

/// Remote catalog operations used by the browser and the detail view.
pub trait CatalogApi {
    /// `GET /api/books` with every request parameter.
    fn search_books(
        &self,
        request: &CatalogRequest<'_>,
    ) -> impl Future<Output = ClientResult<CatalogPage>>;

    /// `GET /api/books/random?limit=`.
    fn random_books(&self, limit: usize) -> impl Future<Output = ClientResult<Vec<BookSummary>>>;

    /// `GET /api/books/{id}`; any non-2xx answer means the book is missing.
    fn get_book(&self, id: BookId) -> impl Future<Output = ClientResult<BookDetail>>;
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decodes a search response, filling page fields the server left out.
pub fn decode_catalog_page(
    status: u16,
    body: &[u8],
    request: &CatalogRequest<'_>,
) -> ClientResult<CatalogPage> {
    if !is_success(status) {
        return Err(ClientError::Status(status));
    }
    let mut page: CatalogPage = serde_json::from_slice(body)?;
    if page.page == 0 {
        page.page = request.page;
    }
    if page.page_size == 0 {
        page.page_size = request.page_size;
    }
    Ok(page)
}

pub fn decode_popular(status: u16, body: &[u8]) -> ClientResult<Vec<BookSummary>> {
    if !is_success(status) {
        return Err(ClientError::Status(status));
    }
    let payload: PopularPayload = serde_json::from_slice(body)?;
    Ok(payload.items)
}

pub fn decode_book(status: u16, body: &[u8]) -> ClientResult<BookDetail> {
    if !is_success(status) {
        return Err(ClientError::NotFound);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Runs the search for `state`, substituting an empty page on any failure.
pub async fn fetch_catalog_page<C>(api: &C, state: &QueryState) -> CatalogPage
where
    C: CatalogApi,
{
    let request = state.to_request();
    match api.search_books(&request).await {
        Ok(page) => page,
        Err(err) => {
            log::warn!("Catalog search failed, showing no results: {err}");
            CatalogPage::empty(request.page, request.page_size)
        }
    }
}

/// Loads the popular shelf, empty on any failure.
pub async fn fetch_popular<C>(api: &C, limit: usize) -> Vec<BookSummary>
where
    C: CatalogApi,
{
    match api.random_books(limit).await {
        Ok(items) => items,
        Err(err) => {
            log::warn!("Popular shelf request failed: {err}");
            Vec::new()
        }
    }
}
