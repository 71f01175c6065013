//! Requests

use thiserror::Error;

use crate::items::ItemSet;

/// Maximum number of distinct items a request may contain.
pub const MAX_REQUEST_ITEMS: usize = 64;

/// Errors building a request.
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    /// More distinct items were requested than the solver can track.
    #[error("request contains {count} distinct items, at most {MAX_REQUEST_ITEMS} are supported")]
    TooManyItems {
        /// Number of distinct items requested
        count: usize,
    },
}

/// A normalised set of requested item names.
///
/// Items are kept in lexicographic order, which is the order the cover solver resolves
/// them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    items: ItemSet,
}

impl Request {
    /// Build a request from raw item names.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::TooManyItems`] if more than [`MAX_REQUEST_ITEMS`] distinct
    /// items remain after normalisation.
    pub fn new<I, S>(names: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_items(ItemSet::new(names))
    }

    /// Build a request from an already normalised item set.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::TooManyItems`] if the set is too large.
    pub fn from_items(items: ItemSet) -> Result<Self, RequestError> {
        if items.len() > MAX_REQUEST_ITEMS {
            return Err(RequestError::TooManyItems { count: items.len() });
        }

        Ok(Self { items })
    }

    /// Requested items.
    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    /// Position of an item in the canonical order, if requested.
    pub fn position(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|requested| requested == item)
    }

    /// Number of distinct requested items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_normalises_and_dedups() -> TestResult {
        let request = Request::new(["Burger ", "tofu_log", "burger"])?;

        assert_eq!(request.len(), 2);
        assert_eq!(request.position("burger"), Some(0));
        assert_eq!(request.position("tofu_log"), Some(1));
        assert_eq!(request.position("tea"), None);

        Ok(())
    }

    #[test]
    fn blank_names_are_ignored() -> TestResult {
        let request = Request::new(["", "   "])?;

        assert!(request.is_empty());

        Ok(())
    }

    #[test]
    fn too_many_items_is_rejected() {
        let names: Vec<String> = (0..=MAX_REQUEST_ITEMS).map(|i| format!("item_{i}")).collect();

        assert_eq!(
            Request::new(names),
            Err(RequestError::TooManyItems {
                count: MAX_REQUEST_ITEMS + 1
            })
        );
    }
}
