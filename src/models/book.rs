use diesel::prelude::*;

use crate::domain::book::{BookDetail, BookSummary};
use crate::domain::types::{BookId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::books)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::book::BookSummary`].
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub pdf_path: String,
    pub image_path: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::books)]
/// Insertable form of [`Book`].
pub struct NewBook<'a> {
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub description: Option<&'a str>,
    pub pdf_path: &'a str,
    pub image_path: Option<&'a str>,
}

impl TryFrom<Book> for BookSummary {
    type Error = TypeConstraintError;

    fn try_from(book: Book) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BookId::new(book.id)?,
            title: book.title,
            author: book.author,
            description: book.description,
            cover_image_path: book.image_path,
            document_path: book.pdf_path,
        })
    }
}

impl TryFrom<Book> for BookDetail {
    type Error = TypeConstraintError;

    fn try_from(book: Book) -> Result<Self, Self::Error> {
        BookSummary::try_from(book).map(BookDetail::from)
    }
}

impl<'a> From<&'a crate::domain::book::NewBook> for NewBook<'a> {
    fn from(book: &'a crate::domain::book::NewBook) -> Self {
        Self {
            title: book.title.as_str(),
            author: book.author.as_deref(),
            description: book.description.as_deref(),
            pdf_path: book.document_path.as_str(),
            image_path: book.cover_image_path.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book(id: i32) -> Book {
        Book {
            id,
            title: "Dune".to_string(),
            author: Some("Frank Herbert".to_string()),
            description: None,
            pdf_path: "pdfs/dune.pdf".to_string(),
            image_path: Some("images/dune.jpg".to_string()),
        }
    }

    #[test]
    fn book_into_summary() {
        let summary = BookSummary::try_from(sample_book(4)).unwrap();
        assert_eq!(summary.id.get(), 4);
        assert_eq!(summary.title, "Dune");
        assert_eq!(summary.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(summary.document_path, "pdfs/dune.pdf");
        assert_eq!(summary.cover_image_path.as_deref(), Some("images/dune.jpg"));
    }

    #[test]
    fn book_with_invalid_id_is_rejected() {
        assert_eq!(
            BookDetail::try_from(sample_book(0)),
            Err(TypeConstraintError::NonPositiveId)
        );
    }

    #[test]
    fn from_domain_new_book() {
        let domain = crate::domain::book::NewBook::new(
            " Emma ",
            Some("Jane Austen".to_string()),
            Some("  ".to_string()),
            "pdfs/emma.pdf",
            None,
        );
        let insertable: NewBook = (&domain).into();
        assert_eq!(insertable.title, "Emma");
        assert_eq!(insertable.author, Some("Jane Austen"));
        assert_eq!(insertable.description, None);
        assert_eq!(insertable.pdf_path, "pdfs/emma.pdf");
    }
}
