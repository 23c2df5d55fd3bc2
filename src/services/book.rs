use crate::client::{CatalogApi, ClientError};
use crate::domain::types::BookId;
use crate::dto::book::BookPageData;
use crate::viewer::RENDER_SCALE;

/// Resolves the book addressed by the `id` page parameter.
///
/// A missing, malformed or unknown id and any fetch failure all render the
/// not-found page; no document is handed to the PDF renderer in that case.
pub async fn load_book_page<C>(api: &C, raw_id: Option<&str>) -> BookPageData
where
    C: CatalogApi,
{
    let Some(id) = raw_id.and_then(|raw| raw.parse::<BookId>().ok()) else {
        log::warn!("Book page requested with invalid id {raw_id:?}");
        return BookPageData::not_found();
    };

    let detail = match api.get_book(id).await {
        Ok(detail) => detail,
        Err(ClientError::NotFound) => {
            log::info!("Book {id} not found");
            return BookPageData::not_found();
        }
        Err(err) => {
            log::warn!("Failed to fetch book {id}: {err}");
            return BookPageData::not_found();
        }
    };

    let document = detail.document_path().to_string();

    BookPageData {
        found: true,
        title: detail.title().to_string(),
        author: detail.author().unwrap_or_default().to_string(),
        description: detail.description().unwrap_or_default().to_string(),
        download_url: Some(document.clone()),
        document_url: Some(document),
        render_scale: RENDER_SCALE,
    }
}
