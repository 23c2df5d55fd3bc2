use serde::Serialize;

use crate::viewer::RENDER_SCALE;

/// Title shown when the requested book cannot be resolved.
pub const NOT_FOUND_TITLE: &str = "Book not found";

/// Fields of the detail template.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookPageData {
    pub found: bool,
    pub title: String,
    pub author: String,
    pub description: String,
    /// Document handed to the PDF renderer. `None` disables loading entirely.
    pub document_url: Option<String>,
    pub download_url: Option<String>,
    pub render_scale: f32,
}

impl BookPageData {
    pub fn not_found() -> Self {
        Self {
            found: false,
            title: NOT_FOUND_TITLE.to_string(),
            author: String::new(),
            description: String::new(),
            document_url: None,
            download_url: None,
            render_scale: RENDER_SCALE,
        }
    }
}
