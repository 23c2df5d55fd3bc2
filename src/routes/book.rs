use actix_web::{Responder, get, web};
use serde::Deserialize;
use tera::Tera;

use crate::client::http::HttpCatalogClient;
use crate::routes::{base_context, render_template};
use crate::services::book::load_book_page;

#[derive(Deserialize)]
struct BookQueryParams {
    id: Option<String>,
}

#[get("/book")]
pub async fn show_book(
    params: web::Query<BookQueryParams>,
    catalog: web::Data<HttpCatalogClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let book = load_book_page(catalog.get_ref(), params.id.as_deref()).await;

    let mut context = base_context("book");
    context.insert("book", &book);

    render_template(&tera, "book/index.html", &context)
}
