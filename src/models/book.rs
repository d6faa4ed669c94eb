//! Book model, form payloads and availability states

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Column list shared by every statement that returns a book row
pub const BOOK_COLUMNS: &str = "isbn, title, author, price, is_available";

/// Largest price a `NUMERIC(10, 2)` column accepts: 99999999.99
const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Book record from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: Decimal,
    pub is_available: bool,
}

impl Book {
    pub fn availability(&self) -> Availability {
        Availability::from(self.is_available)
    }
}

/// Validated book fields, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: Decimal,
}

/// Raw create/update form as posted by the browser
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub price: Option<String>,
}

impl BookForm {
    /// Check presence of every field, then the price.
    ///
    /// Presence is checked first so that a form missing fields is a
    /// validation error even when its price is also garbage.
    pub fn into_draft(self) -> AppResult<BookDraft> {
        self.validate()?;

        let (Some(isbn), Some(title), Some(author), Some(price)) =
            (self.isbn, self.title, self.author, self.price)
        else {
            return Err(AppError::Validation("missing required field(s)".to_string()));
        };

        Ok(BookDraft {
            isbn,
            title,
            author,
            price: parse_price(&price)?,
        })
    }
}

/// Query string or form carrying only the book key
#[derive(Debug, Default, Deserialize, Validate)]
pub struct IsbnParams {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub isbn: Option<String>,
}

impl IsbnParams {
    pub fn into_isbn(self) -> AppResult<String> {
        self.validate()?;
        self.isbn
            .ok_or_else(|| AppError::Validation("missing required field(s): isbn".to_string()))
    }
}

/// Parse a user-supplied price into a two-decimal amount.
///
/// Accepts plain and scientific notation. Negative, non-finite and
/// out-of-range values are rejected like any other unparseable input.
pub fn parse_price(raw: &str) -> AppResult<Decimal> {
    let trimmed = raw.trim();
    // rust_decimal skips digit separators; a form price never has them
    if trimmed.contains('_') {
        return Err(AppError::UnparseablePrice(raw.to_string()));
    }
    let mut price = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AppError::UnparseablePrice(raw.to_string()))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::UnparseablePrice(raw.to_string()));
    }

    price.rescale(2);
    if price > MAX_PRICE {
        return Err(AppError::UnparseablePrice(raw.to_string()));
    }
    // "-0" parses; store it as plain zero
    price.set_sign_positive(true);

    Ok(price)
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Lending state of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Borrowed,
}

impl From<bool> for Availability {
    fn from(is_available: bool) -> Self {
        if is_available {
            Availability::Available
        } else {
            Availability::Borrowed
        }
    }
}

impl Availability {
    pub fn is_available(self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Borrowed => "borrowed",
        }
    }
}

/// Availability change requested by a borrow or return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Borrow,
    Return,
}

impl Transition {
    /// State the book ends up in
    pub fn target(self) -> Availability {
        match self {
            Transition::Borrow => Availability::Borrowed,
            Transition::Return => Availability::Available,
        }
    }

    /// Whether the transition moves a book out of `current`
    pub fn changes(self, current: Availability) -> bool {
        current != self.target()
    }
}
