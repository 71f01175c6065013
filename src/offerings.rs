//! Offerings

use rust_decimal::Decimal;
use thiserror::Error;

use crate::items::ItemSet;

/// Errors raised when an offering would break its invariants.
#[derive(Debug, Error, PartialEq)]
pub enum OfferingError {
    /// The price was zero or negative.
    #[error("offering price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    /// The offering covered no items.
    #[error("offering must cover at least one item")]
    NoItems,
}

/// A priced set of items a restaurant sells together.
///
/// An offering covering exactly one item is a single; one covering several is a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Offering {
    price: Decimal,
    items: ItemSet,
}

impl Offering {
    /// Create a new offering.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferingError`] if the price is not positive or the item set is empty.
    pub fn new(price: Decimal, items: ItemSet) -> Result<Self, OfferingError> {
        if price <= Decimal::ZERO {
            return Err(OfferingError::NonPositivePrice(price));
        }

        if items.is_empty() {
            return Err(OfferingError::NoItems);
        }

        Ok(Self { price, items })
    }

    /// Price paid for the whole offering.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Items covered by the offering.
    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    /// Whether the offering covers more than one item.
    pub fn is_bundle(&self) -> bool {
        self.items.len() > 1
    }

    /// Whether the offering covers the given item.
    pub fn covers(&self, item: &str) -> bool {
        self.items.contains(item)
    }
}
