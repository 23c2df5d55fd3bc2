use serde::{Deserialize, Serialize};

use crate::domain::types::BookId;

/// A book as listed in the catalog.
///
/// On the wire the cover is `image_path` and the document is `pdf_path`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "image_path")]
    pub cover_image_path: Option<String>,
    #[serde(rename = "pdf_path")]
    pub document_path: String,
}

/// A single book resolved for the detail view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookDetail {
    #[serde(flatten)]
    pub summary: BookSummary,
}

impl BookDetail {
    pub fn id(&self) -> BookId {
        self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    pub fn author(&self) -> Option<&str> {
        self.summary.author.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.summary.description.as_deref()
    }

    pub fn document_path(&self) -> &str {
        &self.summary.document_path
    }
}

impl From<BookSummary> for BookDetail {
    fn from(summary: BookSummary) -> Self {
        Self { summary }
    }
}

impl From<BookDetail> for BookSummary {
    fn from(detail: BookDetail) -> Self {
        detail.summary
    }
}

/// A book to be added to the catalog.
#[derive(Clone, Debug, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub document_path: String,
    pub cover_image_path: Option<String>,
}

impl NewBook {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: Option<String>,
        description: Option<String>,
        document_path: impl Into<String>,
        cover_image_path: Option<String>,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            author: non_blank(author),
            description: non_blank(description),
            document_path: document_path.into().trim().to_string(),
            cover_image_path: non_blank(cover_image_path),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
