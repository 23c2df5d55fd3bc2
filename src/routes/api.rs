use actix_web::{HttpResponse, Responder, get, web};
use log::error;
use serde::Deserialize;

use crate::dto::api::BooksQuery;
use crate::repository::DieselRepository;
use crate::routes::lenient_number;
use crate::services::{ServiceError, api as service};

#[derive(Deserialize)]
struct BooksQueryParams {
    q: Option<String>,
    sort: Option<String>,
    order: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
}

impl From<BooksQueryParams> for BooksQuery {
    fn from(params: BooksQueryParams) -> Self {
        Self {
            page: lenient_number(params.page.as_deref()),
            page_size: lenient_number(params.page_size.as_deref()),
            search: params.q,
            sort: params.sort,
            order: params.order,
        }
    }
}

#[derive(Deserialize)]
struct RandomBooksParams {
    limit: Option<String>,
}

fn service_error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
            "detail": "Book not found"
        })),
        err => {
            error!("{context}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/books")]
pub async fn list_books(
    params: web::Query<BooksQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::list_books(repo.get_ref(), params.into_inner().into()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => service_error_response("Failed to list books", e),
    }
}

#[get("/books/random")]
pub async fn random_books(
    params: web::Query<RandomBooksParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let limit = lenient_number(params.limit.as_deref());
    match service::random_books(repo.get_ref(), limit) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => service_error_response("Failed to pick random books", e),
    }
}

#[get("/books/{book_id}")]
pub async fn get_book(
    book_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::get_book(repo.get_ref(), book_id.into_inner()) {
        Ok(book) => HttpResponse::Ok().json(book),
        Err(e) => service_error_response("Failed to get book", e),
    }
}
