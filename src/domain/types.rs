//! Strongly-typed value objects used by the catalog domain.
//!
//! These wrappers enforce basic invariants (positive identifiers, allowed page
//! sizes, known sort orders) so that once a value reaches the domain layer it
//! can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sort field used when the browser starts.
pub const DEFAULT_SORT_KEY: &str = "id";

/// Page sizes offered by the catalog browser.
pub const ALLOWED_PAGE_SIZES: [usize; 5] = [12, 18, 24, 36, 48];

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided page size is not one of [`ALLOWED_PAGE_SIZES`].
    #[error("page size {0} is not allowed")]
    PageSizeNotAllowed(usize),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Unique identifier for a book in the catalog.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub struct BookId(i32);

impl BookId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i32` backing this identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for BookId {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BookId> for i32 {
    fn from(value: BookId) -> Self {
        value.0
    }
}

impl FromStr for BookId {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i32>()
            .map_err(|_| TypeConstraintError::InvalidValue(s.to_string()))?;
        Self::new(value)
    }
}

/// Sort field token agreed with the catalog API.
///
/// The browser never interprets the token, it only forwards it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SortKey(String);

impl SortKey {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self(DEFAULT_SORT_KEY.to_string())
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction applied to the sort key.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Number of books shown per catalog page.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Accepts only sizes from [`ALLOWED_PAGE_SIZES`].
    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        if ALLOWED_PAGE_SIZES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::PageSizeNotAllowed(value))
        }
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(18)
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TypeConstraintError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

impl FromStr for PageSize {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<usize>()
            .map_err(|_| TypeConstraintError::InvalidValue(s.to_string()))?;
        Self::new(value)
    }
}
