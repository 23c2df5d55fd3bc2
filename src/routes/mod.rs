//! HTTP handlers: the JSON catalog API and the server-rendered views.

use actix_web::HttpResponse;
use chrono::{Datelike, Utc};
use tera::{Context, Tera};

pub mod api;
pub mod book;
pub mod main;

/// Context shared by every page template.
pub fn base_context(current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("current_page", current_page);
    context.insert("current_year", &Utc::now().year());
    context
}

/// Renders `template` or answers 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Parses a numeric query parameter, treating anything unparseable as absent.
pub(crate) fn lenient_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_number_ignores_garbage() {
        assert_eq!(lenient_number::<i64>(Some(" 12 ")), Some(12));
        assert_eq!(lenient_number::<i64>(Some("-3")), Some(-3));
        assert_eq!(lenient_number::<i64>(Some("twelve")), None);
        assert_eq!(lenient_number::<usize>(None), None);
    }

    #[test]
    fn broken_template_is_server_error() {
        let tera = Tera::default();
        let response = render_template(&tera, "missing.html", &base_context("index"));
        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
