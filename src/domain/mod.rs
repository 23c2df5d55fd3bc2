//! Catalog domain: books, value objects and the browser query state.

pub mod book;
pub mod query;
pub mod types;
