use crate::browser::{BookCard, CatalogView};

/// Query parameters of the home view, as found in the page address.
#[derive(Debug, Default)]
pub struct IndexQuery {
    /// Search text typed by the user.
    pub search: Option<String>,
    /// Combined `field|order` sort selection.
    pub sort: Option<String>,
    pub page_size: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the home template.
pub struct IndexPageData {
    pub catalog: CatalogView,
    /// Randomly chosen books for the popular shelf.
    pub popular: Vec<BookCard>,
}
