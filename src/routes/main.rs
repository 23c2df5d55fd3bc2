use actix_web::{Responder, get, web};
use serde::Deserialize;
use tera::Tera;

use crate::client::http::HttpCatalogClient;
use crate::dto::main::IndexQuery;
use crate::routes::{base_context, lenient_number, render_template};
use crate::services::main::load_index_page;

#[derive(Deserialize)]
struct IndexQueryParams {
    q: Option<String>,
    sort: Option<String>,
    page_size: Option<String>,
    page: Option<String>,
}

impl From<IndexQueryParams> for IndexQuery {
    fn from(params: IndexQueryParams) -> Self {
        Self {
            page: lenient_number(params.page.as_deref()),
            search: params.q,
            sort: params.sort,
            page_size: params.page_size,
        }
    }
}

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexQueryParams>,
    catalog: web::Data<HttpCatalogClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = load_index_page(catalog.get_ref(), params.into_inner().into()).await;

    let mut context = base_context("index");
    context.insert("catalog", &data.catalog);
    context.insert("popular", &data.popular);

    render_template(&tera, "main/index.html", &context)
}
