//! Online library: a searchable, paginated book catalog with a PDF reader.
//!
//! The `data` feature carries the catalog model and its Diesel storage. The
//! `server` feature adds the catalog API, the catalog client and the
//! server-rendered views on top of it.

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::http::header;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::client::http::HttpCatalogClient;
#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::api::{get_book, list_books, random_books};
#[cfg(feature = "server")]
use crate::routes::book::show_book;
#[cfg(feature = "server")]
use crate::routes::main::show_index;

pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod browser;
#[cfg(feature = "server")]
pub mod client;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod partials;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod viewer;

/// Headers that keep browsers and proxies from caching any response.
#[cfg(feature = "server")]
pub fn no_cache_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add((header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
        .add((header::PRAGMA, "no-cache"))
        .add((header::EXPIRES, "0"))
}

/// Loads templates and registers the template functions they rely on.
#[cfg(feature = "server")]
pub fn build_templates(templates_dir: &str, partials_dir: &str) -> tera::Result<Tera> {
    let mut tera = Tera::new(templates_dir)?;
    partials::register(&mut tera, partials_dir);
    Ok(tera)
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let tera = build_templates(&server_config.templates_dir, &server_config.partials_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving the library on {}:{}, catalog API at {}",
        bind_address.0,
        bind_address.1,
        server_config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(no_cache_headers())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(list_books)
                    .service(random_books)
                    .service(get_book),
            )
            .service(show_index)
            .service(show_book)
            .service(Files::new("/", &server_config.static_dir))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(HttpCatalogClient::new(
                &server_config.api_base_url,
            )))
    })
    .bind(bind_address)?
    .run()
    .await
}
