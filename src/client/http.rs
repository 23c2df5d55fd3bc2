//! [`CatalogApi`] over HTTP using the actix web client.

use actix_web::http::header;
use actix_web::web::Bytes;
use awc::Client;

use crate::client::{
    CatalogApi, CatalogPage, ClientError, ClientResult, decode_book, decode_catalog_page,
    decode_popular,
};
use crate::domain::book::{BookDetail, BookSummary};
use crate::domain::query::CatalogRequest;
use crate::domain::types::BookId;

/// HTTP client for a catalog API rooted at `base_url`.
///
/// `awc::Client` is bound to the worker it was created on, so build one per
/// worker inside the `HttpServer` factory.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path_and_query: &str) -> ClientResult<(u16, Bytes)> {
        let url = format!("{}{}", self.base_url, path_and_query);
        log::debug!("GET {url}");

        let mut response = self
            .client
            .get(&url)
            .insert_header((header::ACCEPT, "application/json"))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok((status, body))
    }
}

impl CatalogApi for HttpCatalogClient {
    async fn search_books(&self, request: &CatalogRequest<'_>) -> ClientResult<CatalogPage> {
        let query = request.to_query_string()?;
        let (status, body) = self.get(&format!("/api/books?{query}")).await?;
        decode_catalog_page(status, &body, request)
    }

    async fn random_books(&self, limit: usize) -> ClientResult<Vec<BookSummary>> {
        let (status, body) = self
            .get(&format!("/api/books/random?limit={limit}"))
            .await?;
        decode_popular(status, &body)
    }

    async fn get_book(&self, id: BookId) -> ClientResult<BookDetail> {
        let (status, body) = self.get(&format!("/api/books/{id}")).await?;
        decode_book(status, &body)
    }
}
