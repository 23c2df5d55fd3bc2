use actix_files::Files;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::Value;

use pushkind_library::client::http::HttpCatalogClient;
use pushkind_library::dto::book::BookPageData;
use pushkind_library::routes::base_context;
use pushkind_library::viewer::RENDER_SCALE;
use pushkind_library::routes::api::{get_book, list_books, random_books};
use pushkind_library::routes::book::show_book;
use pushkind_library::routes::main::show_index;
use pushkind_library::{build_templates, no_cache_headers};

mod common;

/// Nothing listens on the discard port, so every catalog request fails.
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

macro_rules! library_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .wrap(no_cache_headers())
                .service(
                    web::scope("/api")
                        .service(list_books)
                        .service(random_books)
                        .service(get_book),
                )
                .service(show_index)
                .service(show_book)
                .service(Files::new("/", "static"))
                .app_data(web::Data::new(
                    build_templates("templates/**/*", "static/partials").unwrap(),
                ))
                .app_data(web::Data::new(common::seeded($test_db)))
                .app_data(web::Data::new(HttpCatalogClient::new(UNREACHABLE_API))),
        )
        .await
    };
}

#[actix_web::test]
async fn api_lists_books_with_defaults() {
    let test_db = common::TestDb::new("api_lists_books_with_defaults.db");
    let app = library_app!(&test_db);

    let req = test::TestRequest::get().uri("/api/books").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 5);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 12);
    assert_eq!(body["sort"], "title");
    assert_eq!(body["order"], "asc");
    assert_eq!(body["items"][0]["title"], "Anathem");
    assert_eq!(body["items"][0]["pdf_path"], "pdfs/anathem.pdf");
}

#[actix_web::test]
async fn api_clamps_and_whitelists_parameters() {
    let test_db = common::TestDb::new("api_clamps_and_whitelists_parameters.db");
    let app = library_app!(&test_db);

    let req = test::TestRequest::get()
        .uri("/api/books?q=%20dune%20&sort=rating&order=DESC&page=-2&page_size=100")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 48);
    assert_eq!(body["sort"], "title");
    assert_eq!(body["order"], "desc");
    assert_eq!(body["items"][0]["title"], "Dune");

    let req = test::TestRequest::get()
        .uri("/api/books?page_size=0&page=abc")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page_size"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn api_huge_pages_answer_with_empty_items() {
    let test_db = common::TestDb::new("api_huge_pages_answer_with_empty_items.db");
    let app = library_app!(&test_db);

    let req = test::TestRequest::get()
        .uri("/api/books?page=9223372036854775807&page_size=48")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 5);
    assert_eq!(body["page"], 9223372036854775807_u64);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));

    // Beyond i64 the parameter is unparseable and falls back to the first page.
    let req = test::TestRequest::get()
        .uri("/api/books?page=99999999999999999999")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(5));
}

#[actix_web::test]
async fn api_random_limit_is_clamped() {
    let test_db = common::TestDb::new("api_random_limit_is_clamped.db");
    let app = library_app!(&test_db);

    let req = test::TestRequest::get()
        .uri("/api/books/random?limit=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));

    let req = test::TestRequest::get()
        .uri("/api/books/random?limit=0")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn api_book_detail_and_not_found() {
    let test_db = common::TestDb::new("api_book_detail_and_not_found.db");
    let app = library_app!(&test_db);

    let req = test::TestRequest::get().uri("/api/books/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Frank Herbert");

    for uri in ["/api/books/999", "/api/books/0", "/api/books/abc"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn responses_are_not_cached() {
    let test_db = common::TestDb::new("responses_are_not_cached.db");
    let app = library_app!(&test_db);

    let req = test::TestRequest::get().uri("/api/books").to_request();
    let resp = test::call_service(&app, req).await;
    let headers = resp.headers();
    assert_eq!(
        headers.get(header::CACHE_CONTROL).unwrap(),
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(headers.get(header::PRAGMA).unwrap(), "no-cache");
    assert_eq!(headers.get(header::EXPIRES).unwrap(), "0");
}

#[actix_web::test]
async fn home_renders_empty_catalog_when_api_is_down() {
    let test_db = common::TestDb::new("home_renders_empty_catalog.db");
    let app = library_app!(&test_db);

    let req = test::TestRequest::get().uri("/?q=dune").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Page 1 of 1 • 0 books"));
    assert!(body.contains("Showing 0 of 0 results for “dune”."));
    assert!(body.contains("No books to show."));
    assert!(body.contains("Online Library"));
}

#[actix_web::test]
async fn home_renders_out_of_range_pages() {
    let test_db = common::TestDb::new("home_renders_out_of_range_pages.db");
    let app = library_app!(&test_db);

    let cases = [
        ("/?page=99999999999999999999", "Page 1 of 1 • 0 books"),
        (
            "/?page=9223372036854775807",
            "Page 9223372036854775807 of 1 • 0 books",
        ),
        (
            "/?page=18446744073709551615",
            "Page 18446744073709551615 of 1 • 0 books",
        ),
    ];
    for (uri, summary) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(summary), "{uri}");
    }
}

#[actix_web::test]
async fn book_page_without_catalog_is_not_found() {
    let test_db = common::TestDb::new("book_page_without_catalog.db");
    let app = library_app!(&test_db);

    for uri in ["/book?id=1", "/book?id=abc", "/book"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("Book not found"), "{uri}");
        assert!(!body.contains("pdfCanvas"), "{uri}");
    }
}

#[actix_web::test]
async fn static_partials_are_served() {
    let test_db = common::TestDb::new("static_partials_are_served.db");
    let app = library_app!(&test_db);

    let req = test::TestRequest::get()
        .uri("/partials/footer.html")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[::core::prelude::v1::test]
fn found_book_renders_coalescing_viewer() {
    let tera = build_templates("templates/**/*", "static/partials").unwrap();
    let book = BookPageData {
        found: true,
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        description: "Desert planet politics and spice.".to_string(),
        document_url: Some("pdfs/dune.pdf".to_string()),
        download_url: Some("pdfs/dune.pdf".to_string()),
        render_scale: RENDER_SCALE,
    };
    let mut context = base_context("book");
    context.insert("book", &book);

    let html = tera.render("book/index.html", &context).unwrap();
    assert!(html.contains(r#"const url = "pdfs/dune.pdf";"#));
    assert!(html.contains("const scale = 1.5;"));
    assert!(html.contains("id=\"pdfCanvas\""));
    assert!(html.contains("pending = current;"));
    // A failed render must release the viewer for the next request.
    assert!(html.contains("} finally {\n                rendering = false;"));
}
